//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod verify_admin;

// Re-exports
pub use config::AuthConfig;
pub use verify_admin::VerifyAdminUseCase;
