//! Catalog (Prompt Sharing) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Categories, tags, prompts, validation, ordering, repository traits
//! - `application/` - Admin CRUD, public listing and engagement use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, rate limit middleware, routers
//!
//! ## Consistency Model
//! - Category and tag names are unique within their kind
//! - Prompt writes check every referenced category and tag first; a prompt row
//!   and its tag associations are written together or not at all
//! - A present `tag_ids` replaces the association set; an absent one keeps it
//! - Deleting a category removes its prompts; deleting a tag detaches it.
//!   Both refuse while in use unless forced
//! - Like and copy counters only increase; one like per client identity

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use domain::repository::CatalogRepository;
pub use error::{CatalogError, CatalogResult};
pub use infra::memory::MemoryCatalogRepository;
pub use infra::postgres::{PgCatalogRepository, TableCounts};
pub use presentation::middleware::{RateLimitGuard, enforce_rate_limit, rate_limited};
pub use presentation::router::{
    admin_router, admin_router_generic, public_router, public_router_generic,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
