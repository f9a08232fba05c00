//! Auth (Admin Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin credential pair and its verification
//! - `application/` - Configuration and the verify-admin use case
//! - `presentation/` - Admin gate middleware, dashboard handler, router
//!
//! ## Security Model
//! - A single static admin pair, configured through the environment
//! - HTTP Basic authentication; every failure is a uniform 401 with a `Basic` challenge
//! - Username and password are compared in constant time, independently
//! - Configured secrets are zeroized on drop and redacted from `Debug`

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::credentials::AdminCredentials;
pub use error::{AuthError, AuthResult};
pub use presentation::middleware::{AdminPrincipal, require_admin, with_admin_gate};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
