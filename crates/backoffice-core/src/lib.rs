//! backoffice-core - Core types and traits for the back-office data-access layer.
//!
//! This crate holds everything the services and controllers agree on: the
//! query and page shapes, the entity records, the unified [`Error`], and the
//! seam traits ([`Transport`], [`SessionStore`], [`PageSource`],
//! [`StatusUpdater`]) that let each layer be swapped out in tests.

pub mod credentials;
pub mod error;
pub mod models;
pub mod mutation;
pub mod tokens;
pub mod traits;
pub mod types;
pub mod validation;

pub use credentials::{Credentials, Registration};
pub use error::Error;
pub use mutation::MutationIntent;
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{PageSource, SessionStore, StatusRecord, StatusUpdater, StorageKey, Transport};
pub use types::{ApiRequest, ApiUrl, HttpMethod, ListQuery, Page, ProcessStatus, RecordStatus};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
