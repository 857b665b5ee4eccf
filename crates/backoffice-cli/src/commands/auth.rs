//! Session commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use backoffice_core::Credentials;
use backoffice_core::models::User;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Exchange the refresh token for a new session
    Refresh,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn handle(global: &GlobalArgs, cmd: AuthCommand) -> Result<()> {
    let backoffice = session::connect(global)?;
    let auth = &backoffice.auth;

    match cmd.command {
        AuthSubcommand::Login(args) => {
            eprintln!("{}", "Logging in...".dimmed());
            let credentials = Credentials::new(args.email, args.password);
            let session = auth.login(&credentials).await.context("Failed to login")?;

            output::success("Logged in successfully");
            println!();
            print_user(&session.user);
            if let Some(expiry) = session.expiry {
                output::field("Expires", &expiry.to_rfc3339());
            }
        }
        AuthSubcommand::Logout => {
            auth.logout().await.context("Failed to clear session")?;
            output::success("Logged out");
        }
        AuthSubcommand::Whoami => {
            if !auth.is_authenticated() {
                anyhow::bail!("No active session. Run 'backoffice auth login' first.");
            }
            let user = auth.current_user().await.context("Failed to fetch current user")?;
            print_user(&user);
        }
        AuthSubcommand::Refresh => {
            let session = auth.refresh_token().await.context("Failed to refresh session")?;
            output::success("Session refreshed");
            print_user(&session.user);
        }
    }

    Ok(())
}

fn print_user(user: &User) {
    output::field("Name", &user.name);
    output::field("Email", &user.email);
    output::field("Role", &user.role);
    if !user.is_active {
        output::warning("This account is deactivated");
    }
}
