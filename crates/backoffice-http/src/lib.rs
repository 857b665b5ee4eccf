//! backoffice-http - REST-backed resource services.
//!
//! [`HttpTransport`] is the one configured HTTP client: base URL, bearer
//! token from the injected session store, JSON in and out. The services on
//! top of it translate each high-level operation into exactly one request and
//! normalize the answer, substituting synthetic data on failure when
//! [`FallbackPolicy::Synthetic`] is configured.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use backoffice_core::{ApiUrl, ListQuery};
//! use backoffice_file::MemorySessionStore;
//! use backoffice_http::{Backoffice, ClientConfig};
//!
//! # async fn example() -> Result<(), backoffice_core::Error> {
//! let config = ClientConfig::new(ApiUrl::new("https://api.advanzpay.com")?);
//! let backoffice = Backoffice::connect(&config, Arc::new(MemorySessionStore::new()))?;
//!
//! let page = backoffice.employees.list_corp_employees(&ListQuery::first()).await?;
//! for employee in page.items {
//!     println!("{}: {}", employee.no, employee.name);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod endpoints;
mod envelope;
pub mod fallback;
mod services;

pub use client::HttpTransport;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use fallback::FallbackPolicy;
pub use services::{
    AuthService, Backoffice, CorporateService, EmployeeService, EmployeeTransactions, UserService,
};
