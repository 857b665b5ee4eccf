//! backoffice-state - Client-side state for list screens.
//!
//! [`ListController`] drives a paginated, searchable list over any
//! [`PageSource`](backoffice_core::PageSource): debounced search, page
//! clamping and stale-response discard. [`OptimisticList`] holds the rows of
//! such a list and flips their status switches immediately, reverting when
//! the server refuses.
//!
//! Both spawn tokio tasks and must be used from within a runtime.

mod debounce;
mod list;
mod optimistic;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use list::{ListController, ListSnapshot, LoadState};
pub use optimistic::{OptimisticList, StatusControl};
