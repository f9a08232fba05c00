//! API DTOs (Data Transfer Objects)

use serde::Serialize;

/// Admin dashboard response
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub admin_verified: bool,
    pub username: String,
    pub available_endpoints: Vec<&'static str>,
}
