//! Login gate.
//!
//! A fixed username/password pair or a guest bypass. The credentials are
//! plaintext constants; this only decides which name the main window greets.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

pub const DEFAULT_USERNAME: &str = "jojo";
pub const DEFAULT_PASSWORD: &str = "123456";
pub const GUEST_NAME: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.into(),
            password: DEFAULT_PASSWORD.into(),
        }
    }
}

/// What the login screen collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Guest toggle; the text fields are ignored when set.
    pub guest: bool,
}

impl LoginForm {
    pub fn guest() -> Self {
        Self {
            guest: true,
            ..Self::default()
        }
    }

    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            guest: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub guest: bool,
}

impl Session {
    pub fn guest() -> Self {
        Self {
            username: GUEST_NAME.into(),
            guest: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginGate {
    credentials: Credentials,
}

impl LoginGate {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// The username is trimmed before comparison; the password is not.
    pub fn authenticate(&self, form: &LoginForm) -> Result<Session, AuthError> {
        if form.guest {
            tracing::info!("guest login");
            return Ok(Session::guest());
        }

        let username = form.username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        if form.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        if username != self.credentials.username || form.password != self.credentials.password {
            tracing::warn!(username, "rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(username, "login accepted");
        Ok(Session {
            username: username.to_string(),
            guest: false,
        })
    }
}
