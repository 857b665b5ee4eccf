//! Optimistic status toggles.
//!
//! A toggle flips the local copy first and persists second. When the server
//! refuses, the row goes back to the value *that toggle* replaced. Two quick
//! toggles of the same row therefore end last-write-wins locally, but if
//! their responses arrive out of order and one fails, the row can briefly
//! show a value the user did not pick last. The next fetch corrects it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use backoffice_core::error::InvalidInputError;
use backoffice_core::{MutationIntent, RecordStatus, Result, StatusRecord, StatusUpdater};

/// What a status switch renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusControl {
    pub current_value: RecordStatus,
    /// Whether a toggle of this row is still waiting for the server.
    pub pending: bool,
    /// Why the most recent failed toggle was reverted.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct RowMeta {
    in_flight: u32,
    error: Option<String>,
}

struct Rows<R: StatusRecord> {
    records: Vec<R>,
    meta: HashMap<R::Id, RowMeta>,
}

impl<R: StatusRecord> Rows<R> {
    fn find_mut(&mut self, id: &R::Id) -> Option<&mut R> {
        self.records.iter_mut().find(|r| &r.record_id() == id)
    }
}

struct Inner<R: StatusRecord, U> {
    updater: U,
    rows: Mutex<Rows<R>>,
}

/// Local copies of a list's records with optimistic status switches.
pub struct OptimisticList<R: StatusRecord, U> {
    inner: Arc<Inner<R, U>>,
}

impl<R: StatusRecord, U> Clone for OptimisticList<R, U> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, U> OptimisticList<R, U>
where
    R: StatusRecord,
    U: StatusUpdater<R> + 'static,
{
    pub fn new(updater: U) -> Self {
        Self {
            inner: Arc::new(Inner {
                updater,
                rows: Mutex::new(Rows {
                    records: Vec::new(),
                    meta: HashMap::new(),
                }),
            }),
        }
    }

    /// Replace every local copy, typically after a page fetch.
    ///
    /// In-flight toggles keep their bookkeeping; stale errors are dropped.
    pub fn replace_all(&self, records: Vec<R>) {
        let mut rows = self.inner.lock();
        let ids: Vec<R::Id> = records.iter().map(|r| r.record_id()).collect();
        rows.meta.retain(|id, meta| meta.in_flight > 0 && ids.contains(id));
        for meta in rows.meta.values_mut() {
            meta.error = None;
        }
        rows.records = records;
    }

    pub fn records(&self) -> Vec<R> {
        self.inner.lock().records.clone()
    }

    pub fn get(&self, id: &R::Id) -> Option<R> {
        self.inner.lock().find_mut(id).map(|r| r.clone())
    }

    /// Flip the status of record `id`.
    ///
    /// The local copy is flipped before this returns; the returned task
    /// resolves once the server has answered and the row has been settled.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::UnknownRecord`] if no local copy has this
    /// id. Nothing is sent in that case.
    pub fn toggle(&self, id: &R::Id) -> Result<JoinHandle<Result<()>>> {
        let intent = {
            let mut rows = self.inner.lock();
            let record = rows.find_mut(id).ok_or_else(|| InvalidInputError::UnknownRecord {
                id: id.to_string(),
            })?;

            let previous = record.status();
            let intent = MutationIntent::new(id.clone(), "status", previous, previous.toggled());
            record.set_status(intent.new_value);

            let meta = rows.meta.entry(id.clone()).or_default();
            meta.in_flight += 1;
            meta.error = None;
            intent
        };
        debug!(
            id = %intent.target_id,
            from = %intent.previous_value,
            to = %intent.new_value,
            "Optimistic toggle"
        );

        let inner = Arc::clone(&self.inner);
        Ok(tokio::spawn(async move {
            let result = inner.updater.push(&intent).await;
            inner.settle(&intent, result)
        }))
    }

    /// The switch state for record `id`.
    pub fn control(&self, id: &R::Id) -> Option<StatusControl> {
        let mut rows = self.inner.lock();
        let current_value = rows.find_mut(id)?.status();
        let (pending, error) = match rows.meta.get(id) {
            Some(meta) => (meta.in_flight > 0, meta.error.clone()),
            None => (false, None),
        };
        Some(StatusControl {
            current_value,
            pending,
            error,
        })
    }
}

impl<R: StatusRecord, U> Inner<R, U> {
    fn lock(&self) -> MutexGuard<'_, Rows<R>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(
        &self,
        intent: &MutationIntent<R::Id, RecordStatus>,
        result: Result<Option<R>>,
    ) -> Result<()> {
        let mut rows = self.lock();
        let still_pending = {
            let meta = rows.meta.entry(intent.target_id.clone()).or_default();
            meta.in_flight = meta.in_flight.saturating_sub(1);
            meta.in_flight > 0
        };

        match result {
            Ok(canonical) => {
                // Another toggle of this row is still in flight and owns the
                // local value until it settles.
                if let (Some(canonical), false) = (canonical, still_pending) {
                    if canonical.record_id() == intent.target_id {
                        if let Some(record) = rows.find_mut(&intent.target_id) {
                            *record = canonical;
                        }
                    }
                }
                Ok(())
            }
            Err(e) => {
                warn!(
                    id = %intent.target_id,
                    error = %e,
                    revert_to = %intent.previous_value,
                    "Status update failed, reverting"
                );
                if let Some(record) = rows.find_mut(&intent.target_id) {
                    record.set_status(intent.previous_value);
                }
                if let Some(meta) = rows.meta.get_mut(&intent.target_id) {
                    meta.error = Some(e.to_string());
                }
                Err(e)
            }
        }
    }
}
