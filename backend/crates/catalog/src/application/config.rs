//! Application Configuration
//!
//! Configuration for the Catalog application layer.

use kernel::page::PageRequest;
use platform::rate_limit::RateLimitConfig;

use crate::error::{CatalogError, CatalogResult};

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// `per_page` when the query omits it
    pub default_per_page: u32,
    /// Upper bound for admin listings
    pub admin_max_per_page: u32,
    /// Upper bound for public listings
    pub public_max_per_page: u32,
    /// Quota for the like endpoint
    pub like_rate_limit: RateLimitConfig,
    /// Quota for the rate limit demonstration endpoint
    pub demo_rate_limit: RateLimitConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_per_page: 20,
            admin_max_per_page: 100,
            public_max_per_page: 50,
            like_rate_limit: RateLimitConfig::per_minutes(5, 5).with_scope("like"),
            demo_rate_limit: RateLimitConfig::per_minutes(3, 1).with_scope("demo"),
        }
    }
}

impl CatalogConfig {
    pub fn admin_page(&self, page: Option<u32>, per_page: Option<u32>) -> CatalogResult<PageRequest> {
        self.page(page, per_page, self.admin_max_per_page)
    }

    pub fn public_page(&self, page: Option<u32>, per_page: Option<u32>) -> CatalogResult<PageRequest> {
        self.page(page, per_page, self.public_max_per_page)
    }

    fn page(&self, page: Option<u32>, per_page: Option<u32>, max: u32) -> CatalogResult<PageRequest> {
        PageRequest::new(
            page.unwrap_or(1),
            per_page.unwrap_or(self.default_per_page),
            max,
        )
        .map_err(CatalogError::Validation)
    }
}
