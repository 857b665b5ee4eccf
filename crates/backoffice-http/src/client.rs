//! HTTP transport implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use backoffice_core::error::{Error, ProtocolError, TransportError};
use backoffice_core::{ApiRequest, ApiUrl, HttpMethod, Result, SessionStore, StorageKey, Transport};

use crate::config::ClientConfig;

/// Error body the API sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    #[serde(default)]
    response_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// The configured HTTP client.
///
/// Reads the access token from the session store on every request and
/// attaches it as a bearer token; it never writes to the store.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: ApiUrl,
    timeout: Duration,
    store: Arc<dyn SessionStore>,
}

impl HttpTransport {
    /// Build the client for `config`.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base: config.base_url.clone(),
            timeout: config.timeout,
            store,
        })
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn map_error(&self, err: reqwest::Error) -> Error {
        let transport = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(transport)
    }

    /// Turn a response into JSON, or into a protocol error for non-2xx.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let bytes = response.bytes().await.map_err(|e| self.map_error(e))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(Error::Protocol(Self::parse_error_response(response).await))
        }
    }

    async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorEnvelope>().await {
            Ok(body) => ProtocolError::new(status, body.response_code, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(api = %self.base, method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.base.endpoint(&request.path);
        debug!(%url, "API request");
        trace!(query = ?request.query, "query parameters");

        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        match self.store.get(StorageKey::AuthToken) {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Could not read session token, sending unauthenticated"),
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        self.handle_response(response).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base", &self.base)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
