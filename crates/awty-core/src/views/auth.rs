//! Signup and login forms.

use super::Route;
use crate::api::TripApi;
use crate::auth::Credentials;
use crate::error::{Error, FetchError};

const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Signup,
    Login,
}

impl AuthMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Signup => "Sign Up",
            Self::Login => "Log In",
        }
    }

    const fn fallback_message(self) -> &'static str {
        match self {
            Self::Signup => "Signup failed. Please try again.",
            Self::Login => "Login failed. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Signed in; navigate here.
    Redirect(Route),
    /// The server refused or could not be reached; the message is shown.
    Failed,
    /// Nothing was sent: a field is empty or a submit is in flight.
    Rejected,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    pub username: String,
    pub password: String,
    error: Option<String>,
    submitting: bool,
}

impl AuthForm {
    pub const fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            username: String::new(),
            password: String::new(),
            error: None,
            submitting: false,
        }
    }

    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Credentials to send, or `None` when a submit is pending or a field is
    /// empty (the reason is kept as the form error).
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        let credentials = Credentials::new(self.username.trim(), self.password.clone());
        if let Err(error) = credentials.validate() {
            self.error = Some(match error {
                Error::InvalidInput(message) => message,
                other => other.to_string(),
            });
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some(credentials)
    }

    /// Fields stay populated on failure so the user can retry.
    pub fn finish_submit(&mut self, result: Result<String, Error>) -> AuthOutcome {
        self.submitting = false;
        match result {
            Ok(_) => {
                tracing::info!(mode = ?self.mode, "Authenticated");
                self.error = None;
                AuthOutcome::Redirect(Route::Trips)
            }
            Err(error) => {
                tracing::warn!(mode = ?self.mode, "Authentication failed: {}", error);
                self.error = Some(self.failure_message(&error));
                AuthOutcome::Failed
            }
        }
    }

    fn failure_message(&self, error: &Error) -> String {
        match error {
            Error::Fetch(FetchError::Http { body, .. }) => {
                let body = body.trim();
                if body.is_empty() {
                    self.mode.fallback_message().to_string()
                } else {
                    body.to_string()
                }
            }
            Error::Fetch(FetchError::Parse(_)) => self.mode.fallback_message().to_string(),
            Error::InvalidInput(message) => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    pub async fn submit<A: TripApi>(&mut self, api: &A) -> AuthOutcome {
        let Some(credentials) = self.begin_submit() else {
            return AuthOutcome::Rejected;
        };
        let result = match self.mode {
            AuthMode::Signup => api.signup(&credentials).await,
            AuthMode::Login => api.login(&credentials).await,
        };
        self.finish_submit(result)
    }
}

impl std::fmt::Debug for AuthForm {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AuthForm")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("error", &self.error)
            .field("submitting", &self.submitting)
            .finish()
    }
}
