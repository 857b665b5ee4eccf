//! Corporate account commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use backoffice_core::models::{Corporate, NewCorporate};

use super::{load_page, toggle_status};
use crate::cli::{GlobalArgs, PageArgs};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CorporatesCommand {
    #[command(subcommand)]
    pub command: CorporatesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CorporatesSubcommand {
    /// List corporates
    List(PageArgs),

    /// Onboard a corporate with default limits and fees
    Create(CreateArgs),

    /// Switch a corporate between active and inactive
    Toggle(ToggleArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Registered corporation name
    #[arg(long)]
    pub corporation_name: String,

    /// Contact person
    #[arg(long)]
    pub contact: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub mobile: String,
}

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Corporate number
    pub no: u64,

    // The list page the corporate is on.
    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn handle(global: &GlobalArgs, cmd: CorporatesCommand) -> Result<()> {
    let config = session::client_config(global)?;
    let backoffice = session::connect(global)?;
    let service = backoffice.corporates;

    match cmd.command {
        CorporatesSubcommand::List(args) => {
            let snapshot = load_page::<Corporate, _>(service, &config, &args).await?;
            output::page(&snapshot, args.json, row)?;
        }
        CorporatesSubcommand::Create(args) => {
            let form = NewCorporate::new(args.corporation_name, args.contact, args.email, args.mobile);
            let created = service
                .create_corporate(&form)
                .await
                .context("Failed to create corporate")?;
            output::success(&format!("Created corporate {}", created.no));
            println!("{}", row(&created));
        }
        CorporatesSubcommand::Toggle(args) => {
            let snapshot = load_page::<Corporate, _>(service.clone(), &config, &args.page).await?;
            let control = toggle_status(service, snapshot.items, &args.no).await?;
            output::success(&format!(
                "Corporate {} is now {}",
                args.no,
                output::status(control.current_value)
            ));
        }
    }

    Ok(())
}

fn row(corporate: &Corporate) -> String {
    format!(
        "{:>8}  {:<32} {:<28} {:>5} employees  {}",
        corporate.no,
        corporate.name,
        corporate.email,
        corporate.employees,
        output::status(corporate.status)
    )
}
