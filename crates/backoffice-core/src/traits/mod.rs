//! Seams between the layers.

mod page_source;
mod session_store;
mod status;
mod transport;

pub use page_source::PageSource;
pub use session_store::{SessionStore, StorageKey};
pub use status::{StatusRecord, StatusUpdater};
pub use transport::Transport;
