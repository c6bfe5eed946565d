//! Error types for awty-core

use thiserror::Error;

/// Result type alias using awty-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in awty-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A request to the trip API failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token storage error
    #[error("Token storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of a single round trip to the trip API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never completed (DNS, connect, TLS, reset...)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    /// HTTP status of the failed response, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Text suitable for an inline alert.
    ///
    /// HTTP failures show the server's body verbatim when there is one.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("Request failed with HTTP {status}")
                } else {
                    body.to_string()
                }
            }
            Self::Network(_) => "Could not reach the trip server. Please try again.".to_string(),
            Self::Parse(_) => "The trip server sent an unreadable response.".to_string(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
