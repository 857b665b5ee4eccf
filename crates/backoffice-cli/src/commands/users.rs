//! Back-office operator commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use backoffice_core::models::{NewUser, User, UserUpdate};

use super::load_page;
use crate::cli::{GlobalArgs, PageArgs};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    /// List operators
    List(PageArgs),

    /// Show one operator
    Show { id: String },

    /// Add an operator
    Create(CreateArgs),

    /// Change an operator's details
    Update(UpdateArgs),

    /// Activate or deactivate an operator
    Toggle { id: String },

    /// Send an operator a password reset
    ResetPassword { id: String },

    /// Remove an operator
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Initial password
    #[arg(long, env = "BACKOFFICE_NEW_USER_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub role: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub role: Option<String>,
}

pub async fn handle(global: &GlobalArgs, cmd: UsersCommand) -> Result<()> {
    let config = session::client_config(global)?;
    let backoffice = session::connect(global)?;
    let service = backoffice.users;

    match cmd.command {
        UsersSubcommand::List(args) => {
            let snapshot = load_page::<User, _>(service, &config, &args).await?;
            output::page(&snapshot, args.json, row)?;
        }
        UsersSubcommand::Show { id } => {
            let user = service
                .get_user(&id)
                .await
                .with_context(|| format!("Failed to fetch user {}", id))?;
            println!("{}", row(&user));
        }
        UsersSubcommand::Create(args) => {
            let form = NewUser {
                name: args.name,
                email: args.email,
                password: args.password,
                role: args.role,
            };
            let user = service
                .create_user(&form)
                .await
                .context("Failed to create user")?;
            output::success(&format!("Created user {}", user.id));
            println!("{}", row(&user));
        }
        UsersSubcommand::Update(args) => {
            let update = UserUpdate {
                name: args.name,
                email: args.email,
                role: args.role,
                is_active: None,
            };
            let user = service
                .update_user(&args.id, &update)
                .await
                .with_context(|| format!("Failed to update user {}", args.id))?;
            output::success(&format!("Updated user {}", user.id));
            println!("{}", row(&user));
        }
        UsersSubcommand::Toggle { id } => {
            let user = service
                .toggle_user_status(&id)
                .await
                .with_context(|| format!("Failed to toggle user {}", id))?;
            let state = if user.is_active { "active" } else { "inactive" };
            output::success(&format!("User {} is now {}", user.id, state));
        }
        UsersSubcommand::ResetPassword { id } => {
            service
                .reset_user_password(&id)
                .await
                .with_context(|| format!("Failed to reset password of {}", id))?;
            output::success(&format!("Password reset sent for {}", id));
        }
        UsersSubcommand::Delete { id } => {
            service
                .delete_user(&id)
                .await
                .with_context(|| format!("Failed to delete user {}", id))?;
            output::success(&format!("Deleted user {}", id));
        }
    }

    Ok(())
}

fn row(user: &User) -> String {
    let state = if user.is_active { "active" } else { "inactive" };
    format!(
        "{:<10} {:<24} {:<30} {:<12} {}",
        user.id, user.name, user.email, user.role, state
    )
}
