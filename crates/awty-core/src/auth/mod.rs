//! Bearer-token session shared by every authenticated request.
//!
//! The token lives behind a [`TokenStore`] so each front end can pick its own
//! persistence (OS keyring on desktop and CLI, memory in tests) and hand the
//! resulting [`AuthSession`] to the API client at construction.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::error::{Error, Result};

/// Well-known storage key the token is kept under.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Persistence for the single bearer token.
pub trait TokenStore: Clone + Send + Sync + 'static {
    fn load_token(&self) -> Result<Option<String>>;
    fn save_token(&self, token: &str) -> Result<()>;
    fn clear_token(&self) -> Result<()>;
}

/// Process-local token store; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Result<Option<String>> {
        let guard = self
            .slot
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_token(&self, token: &str) -> Result<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// The signed-in session: read on every request, overwritten by signup/login.
///
/// No expiry or refresh is tracked here; the server decides whether a token
/// is still good.
#[derive(Clone)]
pub struct AuthSession<S: TokenStore> {
    store: S,
}

impl<S: TokenStore> AuthSession<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Current token, with blank values treated as absent.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .load_token()?
            .filter(|token| !token.trim().is_empty()))
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    pub fn replace(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Refusing to store an empty token".to_string(),
            ));
        }
        self.store.save_token(token)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear_token()
    }
}

impl<S: TokenStore> fmt::Debug for AuthSession<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("token", &"[REDACTED]")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

/// Username/password pair posted to the signup and login endpoints.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are required; nothing beyond non-empty is checked.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::InvalidInput("Username is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(Error::InvalidInput("Password is required".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_token() {
        let store = MemoryTokenStore::default();
        let session = AuthSession::new(store.clone());
        assert!(!session.is_signed_in());

        session.replace("abc").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("abc"));

        session.clear().unwrap();
        assert_eq!(session.token().unwrap(), None);
    }

    #[test]
    fn blank_token_counts_as_signed_out() {
        let session = AuthSession::new(MemoryTokenStore::with_token("   "));
        assert_eq!(session.token().unwrap(), None);
        assert!(session.replace(" ").is_err());
    }

    #[test]
    fn session_debug_redacts_token() {
        let session = AuthSession::new(MemoryTokenStore::with_token("secret-access-token"));
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn credentials_require_both_fields() {
        assert!(Credentials::new("", "pw").validate().is_err());
        assert!(Credentials::new("amy", "").validate().is_err());
        assert!(Credentials::new("amy", "pw").validate().is_ok());
        assert!(!format!("{:?}", Credentials::new("amy", "hunter2")).contains("hunter2"));
    }
}
