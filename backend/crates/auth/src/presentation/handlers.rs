//! HTTP Handlers

use axum::{Extension, Json};

use crate::presentation::dto::DashboardResponse;
use crate::presentation::middleware::AdminPrincipal;

/// Admin routes advertised by the dashboard
pub const ADMIN_ENDPOINTS: &[&str] = &[
    "GET /admin/categories",
    "POST /admin/categories",
    "GET|PUT|DELETE /admin/categories/{id}",
    "GET /admin/tags",
    "POST /admin/tags",
    "GET|PUT|DELETE /admin/tags/{id}",
    "GET /admin/prompts",
    "POST /admin/prompts",
    "GET|PUT|DELETE /admin/prompts/{id}",
];

/// GET /admin
pub async fn dashboard(Extension(admin): Extension<AdminPrincipal>) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        message: format!("Welcome, {}", admin.username),
        admin_verified: true,
        username: admin.username,
        available_endpoints: ADMIN_ENDPOINTS.to_vec(),
    })
}
