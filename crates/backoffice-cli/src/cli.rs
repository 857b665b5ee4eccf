//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{auth, corp_users, corporates, employees, requests, roles, users};

/// Back-office API client.
#[derive(Parser, Debug)]
#[command(name = "backoffice")]
#[command(author, version = env!("BACKOFFICE_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the back-office API
    #[arg(
        long,
        env = "BACKOFFICE_API_URL",
        default_value = "https://api.advanzpay.com",
        global = true
    )]
    pub api_url: String,

    /// Serve synthetic data when the backend fails (development only)
    #[arg(long, env = "BACKOFFICE_SYNTHETIC_FALLBACK", global = true)]
    pub synthetic_fallback: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Session file (defaults to session.json in the user data directory)
    #[arg(long, env = "BACKOFFICE_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and out, inspect the session
    Auth(auth::AuthCommand),

    /// Corporate accounts
    Corporates(corporates::CorporatesCommand),

    /// Employees enrolled by the corporate
    Employees(employees::EmployeesCommand),

    /// Employee requests awaiting a decision
    Requests(requests::RequestsCommand),

    /// Back-office operators
    Users(users::UsersCommand),

    /// User accounts of the corporate
    CorpUsers(corp_users::CorpUsersCommand),

    /// Corporate user roles
    Roles(roles::RolesCommand),
}

/// Which page of a list to show.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Only show records matching this term
    #[arg(long)]
    pub search: Option<String>,

    /// Print records as JSON lines
    #[arg(long)]
    pub json: bool,
}
