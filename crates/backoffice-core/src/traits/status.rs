//! Records with a togglable status, and whoever persists the toggle.

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;

use crate::Result;
use crate::mutation::MutationIntent;
use crate::types::RecordStatus;

/// A record whose `status` field can be flipped from a list row.
pub trait StatusRecord: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    fn record_id(&self) -> Self::Id;

    fn status(&self) -> RecordStatus;

    fn set_status(&mut self, status: RecordStatus);
}

/// Persists a status change remotely.
///
/// May return the server's canonical copy of the record.
#[async_trait]
pub trait StatusUpdater<R: StatusRecord>: Send + Sync {
    async fn push(&self, intent: &MutationIntent<R::Id, RecordStatus>) -> Result<Option<R>>;
}
