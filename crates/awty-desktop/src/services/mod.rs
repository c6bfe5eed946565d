//! Application services
//!
//! Token persistence and construction of the shared trip API client.

mod token_store;

use std::sync::Arc;

use awty_core::{AuthSession, ClientConfig, TripApiClient};

pub use token_store::KeyringTokenStore;

/// Trip API client used by every page
pub type DesktopClient = TripApiClient<KeyringTokenStore>;

/// Build the client from `AWTY_API_URL`/`AWTY_HTTP_TIMEOUT_SECS`.
pub fn connect() -> awty_core::Result<Arc<DesktopClient>> {
    let config = ClientConfig::from_env()?;
    tracing::info!(api = %config.api_base_url, "Using trip API");
    let session = AuthSession::new(KeyringTokenStore::default());
    Ok(Arc::new(TripApiClient::new(&config, session)?))
}
