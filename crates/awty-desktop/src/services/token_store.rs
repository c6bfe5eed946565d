//! Desktop token persistence using the OS keyring.

use awty_core::auth::TOKEN_STORAGE_KEY;
use awty_core::{Error, Result, TokenStore};
use keyring::Entry;

const KEYRING_SERVICE_NAME: &str = "awty";

/// Bearer token store backed by the OS keyring (`keyring` crate).
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service_name: String,
    username: String,
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self {
            service_name: KEYRING_SERVICE_NAME.to_string(),
            username: TOKEN_STORAGE_KEY.to_string(),
        }
    }
}

impl KeyringTokenStore {
    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service_name, &self.username)
            .map_err(|error| Error::Storage(error.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    fn load_token(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }

    fn save_token(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(|error| Error::Storage(error.to_string()))
    }

    fn clear_token(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }
}
