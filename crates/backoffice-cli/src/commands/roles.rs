//! Corporate user role commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use backoffice_core::models::{CorpUserRole, NewCorpUserRole};

use super::{load_page, toggle_status};
use crate::cli::{GlobalArgs, PageArgs};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RolesCommand {
    #[command(subcommand)]
    pub command: RolesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RolesSubcommand {
    /// List roles
    List(PageArgs),

    /// Role numbers and names, as offered when creating a user
    Options,

    /// Create a role
    Create(CreateArgs),

    /// Switch a role between active and inactive
    Toggle(ToggleArgs),

    /// Mark a role inactive
    Disable {
        /// Role number
        no: u64,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Comma-separated permission names, or `all`
    #[arg(long)]
    pub permissions: String,
}

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Role number
    pub no: u64,

    // The list page the role is on.
    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn handle(global: &GlobalArgs, cmd: RolesCommand) -> Result<()> {
    let config = session::client_config(global)?;
    let backoffice = session::connect(global)?;
    let service = backoffice.users;

    match cmd.command {
        RolesSubcommand::List(args) => {
            let snapshot = load_page::<CorpUserRole, _>(service, &config, &args).await?;
            output::page(&snapshot, args.json, row)?;
        }
        RolesSubcommand::Options => {
            let options = service
                .corp_user_roles_dropdown()
                .await
                .context("Failed to fetch role options")?;
            for option in options {
                println!("{:>6}  {}", option.no, option.name);
            }
        }
        RolesSubcommand::Create(args) => {
            let form = NewCorpUserRole {
                name: args.name,
                description: args.description,
                permissions: args.permissions,
            };
            let created = service
                .create_corp_user_role(&form)
                .await
                .context("Failed to create role")?;
            output::success(&format!("Created role {}", created.no));
            println!("{}", row(&created));
        }
        RolesSubcommand::Toggle(args) => {
            let snapshot = load_page::<CorpUserRole, _>(service.clone(), &config, &args.page).await?;
            let control = toggle_status(service, snapshot.items, &args.no).await?;
            output::success(&format!(
                "Role {} is now {}",
                args.no,
                output::status(control.current_value)
            ));
        }
        RolesSubcommand::Disable { no } => {
            service
                .disable_corp_user_role(no)
                .await
                .with_context(|| format!("Failed to disable role {}", no))?;
            output::success(&format!("Role {} disabled", no));
        }
    }

    Ok(())
}

fn row(role: &CorpUserRole) -> String {
    format!(
        "{:>6}  {:<20} {:<36} {}  [{}]",
        role.no,
        role.name,
        role.description,
        output::status(role.status),
        role.permission_list().join(", ")
    )
}
