//! Employee request queue commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use backoffice_core::models::EmployeeRequest;

use super::load_page;
use crate::cli::{GlobalArgs, PageArgs};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RequestsCommand {
    #[command(subcommand)]
    pub command: RequestsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RequestsSubcommand {
    /// List employee requests
    List(PageArgs),

    /// Show one request
    Show {
        /// Request id
        id: String,
    },

    /// Approve a request
    Approve(DecisionArgs),

    /// Reject a request
    Reject(DecisionArgs),
}

#[derive(Args, Debug)]
pub struct DecisionArgs {
    /// Request id
    pub id: String,

    /// Who is deciding
    #[arg(long)]
    pub by: String,

    /// Note stored with the decision
    #[arg(long)]
    pub remark: Option<String>,
}

pub async fn handle(global: &GlobalArgs, cmd: RequestsCommand) -> Result<()> {
    let config = session::client_config(global)?;
    let backoffice = session::connect(global)?;
    let service = backoffice.employees;

    match cmd.command {
        RequestsSubcommand::List(args) => {
            let snapshot = load_page::<EmployeeRequest, _>(service, &config, &args).await?;
            output::page(&snapshot, args.json, row)?;
        }
        RequestsSubcommand::Show { id } => {
            let request = service
                .get_employee_request(&id)
                .await
                .with_context(|| format!("Failed to fetch request {}", id))?;
            print_request(&request);
        }
        RequestsSubcommand::Approve(args) => {
            let request = service
                .approve_request(&args.id, &args.by, args.remark)
                .await
                .with_context(|| format!("Failed to approve request {}", args.id))?;
            output::success(&format!("Approved request {}", request.request_id));
            print_request(&request);
        }
        RequestsSubcommand::Reject(args) => {
            let request = service
                .reject_request(&args.id, &args.by, args.remark)
                .await
                .with_context(|| format!("Failed to reject request {}", args.id))?;
            output::success(&format!("Rejected request {}", request.request_id));
            print_request(&request);
        }
    }

    Ok(())
}

fn row(request: &EmployeeRequest) -> String {
    format!(
        "{:<10} {:<24} {:<12} {:>10}  {}  {}",
        request.request_id,
        request.employee_name,
        request.requested_type,
        request.amount.as_deref().unwrap_or("-"),
        request.requested_date.format("%Y-%m-%d"),
        request.process_status
    )
}

fn print_request(request: &EmployeeRequest) {
    output::field("Request", &request.request_id);
    output::field("Employee", &request.employee_name);
    output::field("Type", &request.requested_type);
    if let Some(amount) = &request.amount {
        output::field("Amount", amount);
    }
    output::field("Status", &request.process_status.to_string());
    if let Some(by) = &request.processed_by {
        output::field("Processed by", by);
    }
    if let Some(remark) = &request.remark {
        output::field("Remark", remark);
    }
}
