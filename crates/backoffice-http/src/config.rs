//! Client configuration.

use std::time::Duration;

use backoffice_core::ApiUrl;
use backoffice_core::types::DEFAULT_PAGE_SIZE;

use crate::fallback::FallbackPolicy;

/// How long a request may take before it counts as a transport failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to build the transport and the services.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: ApiUrl,
    pub timeout: Duration,
    pub user_agent: String,
    /// What read and write operations do when the backend fails.
    pub fallback: FallbackPolicy,
    /// Page size the list controllers expect the server to use.
    pub page_size_hint: u32,
}

impl ClientConfig {
    /// Configuration with the defaults: 30 s timeout, page size 10, and
    /// failures propagated rather than masked.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("backoffice/", env!("CARGO_PKG_VERSION")).to_string(),
            fallback: FallbackPolicy::Propagate,
            page_size_hint: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Turn the synthetic-data fallback on or off.
    pub fn with_synthetic_fallback(mut self, allow: bool) -> Self {
        self.fallback = FallbackPolicy::from_flag(allow);
        self
    }

    pub fn with_page_size_hint(mut self, hint: u32) -> Self {
        self.page_size_hint = hint.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_off_by_default() {
        let config = ClientConfig::new(ApiUrl::new("https://api.advanzpay.com").unwrap());
        assert_eq!(config.fallback, FallbackPolicy::Propagate);
        assert_eq!(config.page_size_hint, 10);
        assert!(config.user_agent.starts_with("backoffice/"));
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::new(ApiUrl::new("http://localhost:8080").unwrap())
            .with_timeout(Duration::from_secs(2))
            .with_synthetic_fallback(true)
            .with_page_size_hint(0);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.fallback, FallbackPolicy::Synthetic);
        assert_eq!(config.page_size_hint, 1);
    }
}
