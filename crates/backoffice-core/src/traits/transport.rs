//! The wire.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::types::ApiRequest;

/// Sends one request and returns the parsed JSON body.
///
/// Implementations attach the base URL and bearer token. A non-2xx status
/// or an unparsable body is an error; interpreting the envelope is left to
/// the services.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}
