//! Application Configuration
//!
//! Configuration for the Auth application layer.

use crate::domain::credentials::AdminCredentials;
use crate::error::{AuthError, AuthResult};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Only used by debug builds when `ADMIN_PASSWORD` is unset
pub const DEV_ADMIN_PASSWORD: &str = "admin123";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub credentials: AdminCredentials,
}

impl AuthConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: AdminCredentials::new(username, password),
        }
    }

    /// Create config for development (well-known credentials)
    pub fn development() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, DEV_ADMIN_PASSWORD)
    }

    /// Load from `ADMIN_USERNAME` / `ADMIN_PASSWORD`
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    ///
    /// Release builds refuse to start without `ADMIN_PASSWORD`.
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup("ADMIN_USERNAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());

        let password = match lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()) {
            Some(password) => password,
            None if cfg!(debug_assertions) => {
                tracing::warn!("ADMIN_PASSWORD not set, using development default");
                DEV_ADMIN_PASSWORD.to_string()
            }
            None => return Err(AuthError::MissingConfig("ADMIN_PASSWORD")),
        };

        Ok(Self::new(username, password))
    }
}
