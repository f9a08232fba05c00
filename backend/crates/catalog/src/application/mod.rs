//! Application Layer
//!
//! Use cases and application services.

pub mod categories;
pub mod config;
pub mod engagement;
pub mod listing;
pub mod prompts;
pub mod tags;

// Re-exports
pub use categories::CategoryUseCases;
pub use config::CatalogConfig;
pub use engagement::EngagementUseCase;
pub use listing::{ListingPage, ListingQuery, PublicListingUseCase};
pub use prompts::{PromptFilter, PromptUseCases};
pub use tags::TagUseCases;

use kernel::page::PageRequest;

/// One page of admin results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: PageRequest,
}

impl<T> ListPage<T> {
    pub fn has_next(&self) -> bool {
        self.page.offset() + self.page.limit() < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.page.page > 1
    }
}
