//! Client configuration for talking to the trip API.
//!
//! Shared by the desktop and CLI front ends. Values come from the
//! environment (optionally seeded from `.env` by the binaries) or from a CLI
//! profile.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Base URL used when nothing else is configured (the backend's dev server).
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

const API_URL_ENV: &str = "AWTY_API_URL";
const HTTP_TIMEOUT_ENV: &str = "AWTY_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin serving `/api/...`, without a trailing slash
    pub api_base_url: String,
    /// Optional per-request timeout; transport defaults apply when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Build a config for an explicit base URL.
    pub fn new(api_base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url.as_ref())?,
            request_timeout_secs: None,
        })
    }

    /// Read `AWTY_API_URL` and `AWTY_HTTP_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(HTTP_TIMEOUT_ENV).ok(),
        )
    }

    /// Resolve config from raw optional values.
    ///
    /// Public for testability: callers can exercise resolution without
    /// touching the process environment.
    pub fn from_values(api_base_url: Option<String>, timeout_secs: Option<String>) -> Result<Self> {
        let api_base_url = match normalize_text_option(api_base_url) {
            Some(url) => normalize_base_url(&url)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };
        let request_timeout_secs = normalize_text_option(timeout_secs)
            .map(|raw| {
                raw.parse::<u64>().map_err(|error| {
                    Error::Config(format!("{HTTP_TIMEOUT_ENV} must be a whole number: {error}"))
                })
            })
            .transpose()?
            .filter(|secs| *secs > 0);

        Ok(Self {
            api_base_url,
            request_timeout_secs,
        })
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs).filter(|secs| *secs > 0);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Trim, check the scheme, and drop trailing slashes (and a trailing `/api`).
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !is_http_url(trimmed) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    let without_api = trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .trim_end_matches('/');
    Ok(without_api.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_strips_trailing_slash_and_api_segment() {
        assert_eq!(
            normalize_base_url("https://trips.example.com/").unwrap(),
            "https://trips.example.com"
        );
        assert_eq!(
            normalize_base_url(" https://trips.example.com/api/ ").unwrap(),
            "https://trips.example.com"
        );
    }

    #[test]
    fn normalize_base_url_requires_scheme() {
        assert!(normalize_base_url("trips.example.com").is_err());
        assert!(normalize_base_url("   ").is_err());
    }

    #[test]
    fn from_values_defaults_when_unset() {
        let config = ClientConfig::from_values(None, Some(" ".to_string())).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn from_values_parses_timeout() {
        let config = ClientConfig::from_values(
            Some("http://localhost:9000".to_string()),
            Some("15".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn from_values_rejects_bad_timeout() {
        let error = ClientConfig::from_values(None, Some("soon".to_string())).unwrap_err();
        assert!(error.to_string().contains(HTTP_TIMEOUT_ENV));
    }

    #[test]
    fn zero_timeout_means_transport_default() {
        let config = ClientConfig::default().with_timeout_secs(0);
        assert_eq!(config.request_timeout(), None);
    }
}
