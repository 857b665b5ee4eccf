//! Wiring the services to the persisted session.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use backoffice_core::ApiUrl;
use backoffice_file::FileSessionStore;
use backoffice_http::{Backoffice, ClientConfig};

use crate::cli::GlobalArgs;

/// The client configuration the global flags describe.
pub fn client_config(global: &GlobalArgs) -> Result<ClientConfig> {
    let base_url = ApiUrl::new(&global.api_url).context("Invalid API URL")?;
    Ok(ClientConfig::new(base_url)
        .with_timeout(Duration::from_secs(global.timeout_secs))
        .with_user_agent(concat!("backoffice-cli/", env!("BACKOFFICE_VERSION")))
        .with_synthetic_fallback(global.synthetic_fallback))
}

/// Services over the session file the flags point at.
pub fn connect(global: &GlobalArgs) -> Result<Backoffice> {
    let config = client_config(global)?;
    let path = storage::session_path(global.session_file.as_deref())?;
    tracing::debug!(path = %path.display(), "Using session file");

    let store = Arc::new(FileSessionStore::new(path));
    Backoffice::connect(&config, store).context("Failed to build API client")
}
