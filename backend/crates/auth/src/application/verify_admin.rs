//! Verify Admin Use Case

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use platform::basic_auth::BasicCredentials;
use std::sync::Arc;

/// Verify Admin Use Case
pub struct VerifyAdminUseCase {
    config: Arc<AuthConfig>,
}

impl VerifyAdminUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Returns the verified admin username
    ///
    /// Missing and wrong credentials produce the same error.
    pub fn execute(&self, presented: Option<&BasicCredentials>) -> AuthResult<String> {
        let Some(presented) = presented else {
            tracing::debug!("Admin request without Basic credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .config
            .credentials
            .verify(&presented.username, &presented.password)
        {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.config.credentials.username().to_string())
    }
}
