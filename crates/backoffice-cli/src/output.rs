//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use backoffice_core::RecordStatus;
use backoffice_state::ListSnapshot;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// A status, colored by what it means.
pub fn status(status: RecordStatus) -> String {
    match status {
        RecordStatus::Active => status.label().green().to_string(),
        RecordStatus::Inactive => status.label().yellow().to_string(),
        RecordStatus::Blocked => status.label().red().to_string(),
    }
}

/// Print one page of records, either as JSON lines or with `row`, followed by
/// the page position on stderr.
pub fn page<T: Serialize>(
    snapshot: &ListSnapshot<T>,
    as_json: bool,
    row: impl Fn(&T) -> String,
) -> Result<()> {
    if snapshot.items.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for item in &snapshot.items {
        if as_json {
            json(item)?;
        } else {
            println!("{}", row(item));
        }
    }

    eprintln!();
    eprintln!(
        "{} {} of {} ({} records)",
        "Page".dimmed(),
        snapshot.page,
        snapshot.total_pages.max(1),
        snapshot.total
    );
    Ok(())
}
