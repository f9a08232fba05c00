//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use middleware::{AdminPrincipal, require_admin, with_admin_gate};
pub use router::auth_router;
