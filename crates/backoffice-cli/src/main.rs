//! backoffice - command-line client for the back-office API.
//!
//! A thin presentation layer over `backoffice-http` services and
//! `backoffice-state` controllers, for operators and for poking at a backend
//! by hand.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, corp_users, corporates, employees, requests, roles, users};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.json_logs);

    let global = cli.global;
    match cli.command {
        Commands::Auth(cmd) => auth::handle(&global, cmd).await,
        Commands::Corporates(cmd) => corporates::handle(&global, cmd).await,
        Commands::Employees(cmd) => employees::handle(&global, cmd).await,
        Commands::Requests(cmd) => requests::handle(&global, cmd).await,
        Commands::Users(cmd) => users::handle(&global, cmd).await,
        Commands::CorpUsers(cmd) => corp_users::handle(&global, cmd).await,
        Commands::Roles(cmd) => roles::handle(&global, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
