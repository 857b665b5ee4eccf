//! Resource services.
//!
//! One service per resource family. Every operation issues exactly one
//! transport call and normalizes the answer through the envelope module.

mod auth;
mod corporate;
mod employee;
mod user;

pub use auth::AuthService;
pub use corporate::CorporateService;
pub use employee::{EmployeeService, EmployeeTransactions};
pub use user::UserService;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;

use backoffice_core::{ApiRequest, ListQuery, Page, Result, SessionStore, Transport};

use crate::client::HttpTransport;
use crate::config::ClientConfig;
use crate::envelope;
use crate::fallback::{FallbackPolicy, SYNTHETIC_ID_BASE};

/// What every service carries: the wire, the fallback policy and the
/// counter synthetic records draw their `no` from.
#[derive(Clone)]
pub(crate) struct ServiceContext {
    transport: Arc<dyn Transport>,
    fallback: FallbackPolicy,
    synthetic_ids: Arc<AtomicU64>,
}

impl ServiceContext {
    pub(crate) fn new(transport: Arc<dyn Transport>, fallback: FallbackPolicy) -> Self {
        Self {
            transport,
            fallback,
            synthetic_ids: Arc::new(AtomicU64::new(SYNTHETIC_ID_BASE)),
        }
    }

    pub(crate) fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Send a request and strip the envelope.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<Value> {
        envelope::unwrap(self.transport.send(request).await?)
    }

    /// Send a request and decode its payload.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        envelope::decode(self.transport.send(request).await?)
    }

    /// Send a request whose payload, if any, is only used to reconcile.
    pub(crate) async fn fetch_optional<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<T>> {
        envelope::decode_optional(self.transport.send(request).await?)
    }

    /// `GET path?page=..&search=..` and normalize the page.
    pub(crate) async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        list_field: &str,
        query: &ListQuery,
    ) -> Result<Page<T>> {
        let request = ApiRequest::get(path).with_query(query.to_params());
        let value = self.transport.send(request).await?;
        envelope::decode_page(value, list_field, query)
    }

    pub(crate) fn next_synthetic_id(&self) -> u64 {
        self.synthetic_ids.fetch_add(1, Ordering::Relaxed)
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

/// All resource services over one transport and one session store.
#[derive(Debug, Clone)]
pub struct Backoffice {
    pub auth: AuthService,
    pub corporates: CorporateService,
    pub employees: EmployeeService,
    pub users: UserService,
}

impl Backoffice {
    /// Build the HTTP transport for `config` and the services on top of it.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn connect(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let transport = HttpTransport::new(config, Arc::clone(&store))?;
        Ok(Self::with_transport(Arc::new(transport), store, config.fallback))
    }

    /// Services over an arbitrary transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
        fallback: FallbackPolicy,
    ) -> Self {
        let context = || ServiceContext::new(Arc::clone(&transport), fallback);
        Self {
            auth: AuthService::new(context(), store),
            corporates: CorporateService::new(context()),
            employees: EmployeeService::new(context()),
            users: UserService::new(context()),
        }
    }
}
