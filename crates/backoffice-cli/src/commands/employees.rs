//! Corporate employee commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use backoffice_core::models::{CorpEmployee, EmployeeTransaction, NewCorpEmployee};

use super::{load_page, toggle_status};
use crate::cli::{GlobalArgs, PageArgs};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct EmployeesCommand {
    #[command(subcommand)]
    pub command: EmployeesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EmployeesSubcommand {
    /// List enrolled employees
    List(PageArgs),

    /// Enroll an employee
    Create(CreateArgs),

    /// Switch an employee between active and inactive
    Toggle(ToggleArgs),

    /// Show dashboard head counts
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List an employee's transactions
    Transactions(TransactionsArgs),

    /// Mark an employee as verified
    Verify {
        /// Employee id
        id: String,
    },

    /// Remove an employee
    Delete {
        /// Employee id
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub mobile: String,

    /// Basic monthly salary
    #[arg(long)]
    pub salary: f64,

    /// Salary account number
    #[arg(long)]
    pub acc_no: String,

    /// Account holder, defaults to the employee name
    #[arg(long)]
    pub acc_name: Option<String>,

    #[arg(long, default_value = "")]
    pub acc_bank: String,

    #[arg(long, default_value = "")]
    pub acc_branch: String,
}

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Employee number
    pub no: u64,

    // The list page the employee is on.
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct TransactionsArgs {
    /// Employee id
    pub id: String,

    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn handle(global: &GlobalArgs, cmd: EmployeesCommand) -> Result<()> {
    let config = session::client_config(global)?;
    let backoffice = session::connect(global)?;
    let service = backoffice.employees;

    match cmd.command {
        EmployeesSubcommand::List(args) => {
            let snapshot = load_page::<CorpEmployee, _>(service, &config, &args).await?;
            output::page(&snapshot, args.json, row)?;
        }
        EmployeesSubcommand::Create(args) => {
            let form = NewCorpEmployee {
                acc_name: args.acc_name.unwrap_or_else(|| args.name.clone()),
                name: args.name,
                email: args.email,
                mobile: args.mobile,
                basic_sal_amt: args.salary,
                acc_no: args.acc_no,
                acc_bank: args.acc_bank,
                acc_branch: args.acc_branch,
            };
            let created = service
                .create_corp_employee(&form)
                .await
                .context("Failed to enroll employee")?;
            output::success(&format!("Enrolled employee {}", created.no));
            println!("{}", row(&created));
        }
        EmployeesSubcommand::Toggle(args) => {
            let snapshot = load_page::<CorpEmployee, _>(service.clone(), &config, &args.page).await?;
            let control = toggle_status(service, snapshot.items, &args.no).await?;
            output::success(&format!(
                "Employee {} is now {}",
                args.no,
                output::status(control.current_value)
            ));
        }
        EmployeesSubcommand::Stats { json } => {
            let stats = service
                .get_employee_stats()
                .await
                .context("Failed to load employee statistics")?;
            if json {
                output::json(&stats)?;
            } else {
                output::field("Employees", &stats.total_employees.to_string());
                output::field("Active", &stats.active_employees.to_string());
                output::field("Verified", &stats.verified_employees.to_string());
                output::field("Pending requests", &stats.pending_requests.to_string());
            }
        }
        EmployeesSubcommand::Transactions(args) => {
            let source = service.transactions(args.id);
            let snapshot = load_page::<EmployeeTransaction, _>(source, &config, &args.page).await?;
            output::page(&snapshot, args.page.json, transaction_row)?;
        }
        EmployeesSubcommand::Verify { id } => {
            let employee = service
                .verify_employee(&id)
                .await
                .with_context(|| format!("Failed to verify employee {}", id))?;
            output::success(&format!("Verified {} ({})", employee.name, employee.id));
        }
        EmployeesSubcommand::Delete { id } => {
            service
                .delete_employee(&id)
                .await
                .with_context(|| format!("Failed to delete employee {}", id))?;
            output::success(&format!("Deleted employee {}", id));
        }
    }

    Ok(())
}

fn row(employee: &CorpEmployee) -> String {
    format!(
        "{:>8}  {:<24} {:<30} {:>12}  {}  ({})",
        employee.no,
        employee.name,
        employee.email,
        employee.basic_sal_amt,
        output::status(employee.status),
        employee.ap_status
    )
}

fn transaction_row(tx: &EmployeeTransaction) -> String {
    let date = tx
        .created_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!("{:<16} {:<10} {:<12} {:>10}  {}", tx.id, date, tx.kind, tx.amount, tx.status)
}
