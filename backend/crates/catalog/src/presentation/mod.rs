//! Presentation Layer
//!
//! HTTP handlers and DTOs for the admin and public APIs.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod public;
pub mod router;
