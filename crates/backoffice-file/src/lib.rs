//! backoffice-file - Session stores.
//!
//! [`FileSessionStore`] keeps the session in a JSON file so that it survives
//! process restarts; [`MemorySessionStore`] keeps it for the lifetime of the
//! process only.

mod memory;
mod store;

pub use memory::MemorySessionStore;
pub use store::FileSessionStore;
