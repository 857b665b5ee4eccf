//! Command implementations, one module per resource.

pub mod auth;
pub mod corp_users;
pub mod corporates;
pub mod employees;
pub mod requests;
pub mod roles;
pub mod users;

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tokio::sync::watch;

use backoffice_core::{PageSource, StatusRecord, StatusUpdater};
use backoffice_http::ClientConfig;
use backoffice_state::{ListController, ListSnapshot, LoadState, OptimisticList, StatusControl};

use crate::cli::PageArgs;

/// Fetch one page through a list controller and wait for it to settle.
///
/// The search term is applied first, so the page number is checked against
/// the filtered page count.
pub async fn load_page<T, S>(
    source: S,
    config: &ClientConfig,
    args: &PageArgs,
) -> Result<ListSnapshot<T>>
where
    T: Clone + Send + Sync + 'static,
    S: PageSource<T> + 'static,
{
    // No one is typing here, so there is nothing to debounce.
    let list = ListController::with_settings(source, Duration::ZERO, config.page_size_hint);
    let mut updates = list.subscribe();

    match args.search.as_deref().filter(|term| !term.is_empty()) {
        Some(term) => list.set_search(term),
        None => drop(list.load()),
    }
    settled(&mut updates).await?;

    if let Some(fetch) = list.set_page(args.page) {
        fetch.await.context("List fetch task failed")?;
        settled(&mut updates).await?;
    }

    Ok(list.snapshot())
}

async fn settled<T: Clone>(updates: &mut watch::Receiver<ListSnapshot<T>>) -> Result<()> {
    let snapshot = updates
        .wait_for(|s| matches!(s.state, LoadState::Loaded | LoadState::Failed))
        .await
        .context("List controller stopped")?
        .clone();

    if snapshot.state == LoadState::Failed {
        let reason = snapshot.error.unwrap_or_else(|| "unknown error".to_string());
        bail!("Failed to load page {}: {}", snapshot.page, reason);
    }
    Ok(())
}

/// Flip the status of record `id` among `records` and wait for the server.
///
/// Returns the control as it stands once the toggle has settled.
pub async fn toggle_status<R, U>(updater: U, records: Vec<R>, id: &R::Id) -> Result<StatusControl>
where
    R: StatusRecord,
    U: StatusUpdater<R> + 'static,
{
    let list = OptimisticList::new(updater);
    list.replace_all(records);

    let task = list
        .toggle(id)
        .with_context(|| format!("Record {} is not on this page", id))?;
    let outcome = task.await.context("Status update task failed")?;

    let control = list
        .control(id)
        .ok_or_else(|| anyhow!("Record {} disappeared", id))?;
    outcome.with_context(|| format!("Failed to update status of {}", id))?;
    Ok(control)
}
