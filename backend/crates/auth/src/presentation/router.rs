//! Auth Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::with_admin_gate;

/// Create the admin dashboard router (already gated)
pub fn auth_router(config: Arc<AuthConfig>) -> Router {
    with_admin_gate(Router::new().route("/admin", get(handlers::dashboard)), config)
}
