//! Corporate user account commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use backoffice_core::models::{CorpUser, NewCorpUser};

use super::{load_page, toggle_status};
use crate::cli::{GlobalArgs, PageArgs};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CorpUsersCommand {
    #[command(subcommand)]
    pub command: CorpUsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CorpUsersSubcommand {
    /// List corporate users
    List(PageArgs),

    /// Create a corporate user
    Create(CreateArgs),

    /// Switch a corporate user between active and inactive
    Toggle(ToggleArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Job title
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub mobile: String,

    /// Role number, see `backoffice roles options`
    #[arg(long)]
    pub role: u64,
}

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Corporate user number
    pub no: u64,

    // The list page the user is on.
    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn handle(global: &GlobalArgs, cmd: CorpUsersCommand) -> Result<()> {
    let config = session::client_config(global)?;
    let backoffice = session::connect(global)?;
    let service = backoffice.users;

    match cmd.command {
        CorpUsersSubcommand::List(args) => {
            let snapshot = load_page::<CorpUser, _>(service, &config, &args).await?;
            output::page(&snapshot, args.json, row)?;
        }
        CorpUsersSubcommand::Create(args) => {
            let form = NewCorpUser {
                name: args.name,
                email: args.email,
                title: args.title,
                mobile: args.mobile,
                role: args.role,
            };
            let created = service
                .create_corp_user(&form)
                .await
                .context("Failed to create corporate user")?;
            output::success(&format!("Created corporate user {}", created.no));
            println!("{}", row(&created));
        }
        CorpUsersSubcommand::Toggle(args) => {
            let snapshot = load_page::<CorpUser, _>(service.clone(), &config, &args.page).await?;
            let control = toggle_status(service, snapshot.items, &args.no).await?;
            output::success(&format!(
                "Corporate user {} is now {}",
                args.no,
                output::status(control.current_value)
            ));
        }
    }

    Ok(())
}

fn row(user: &CorpUser) -> String {
    format!(
        "{:>8}  {:<24} {:<30} {:<16} {:<14} {}",
        user.no,
        user.name,
        user.email,
        user.title,
        user.role_label,
        output::status(user.status)
    )
}
