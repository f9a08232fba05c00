//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Challenge sent with every 401
pub const BASIC_CHALLENGE: &str = "Basic realm=\"admin\", charset=\"UTF-8\"";

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing, malformed, or wrong credentials (never distinguished)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Required configuration value absent at startup
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::MissingConfig(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid admin credentials");
            }
            AuthError::MissingConfig(key) => {
                tracing::error!(key = %key, "Auth configuration missing");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let app_err = AppError::new(err.kind(), err.to_string());
        match err {
            AuthError::InvalidCredentials => {
                app_err.with_action("Provide valid admin credentials via HTTP Basic authentication")
            }
            AuthError::MissingConfig(_) => app_err,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = matches!(self, AuthError::InvalidCredentials);
        let mut response = AppError::from(self).into_response();
        if challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        response
    }
}
