//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.
//!
//! Integrity violations are translated here, at the store boundary: a
//! duplicate name surfaces as `DuplicateCategoryName`/`DuplicateTagName`, a
//! vanished foreign key as `DanglingReference`.

use std::collections::HashMap;

use kernel::id::{CategoryId, PromptId, TagId};

use crate::domain::entities::{Category, LikeOutcome, Prompt, Tag};
use crate::domain::value_objects::PromptSort;
use crate::error::CatalogResult;

/// Category/tag listing window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub active_only: bool,
    pub offset: i64,
    /// `None` returns every row from `offset` on
    pub limit: Option<i64>,
}

/// Prompt listing filters and window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptQuery {
    pub category_id: Option<CategoryId>,
    /// Only prompts associated with this tag
    pub tag_id: Option<TagId>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub sort: PromptSort,
    pub offset: i64,
    pub limit: i64,
}

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn insert_category(&self, category: &Category) -> CatalogResult<()>;

    async fn find_category(&self, id: CategoryId) -> CatalogResult<Option<Category>>;

    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>>;

    /// Categories among `ids` that exist (any order)
    async fn find_categories(&self, ids: &[CategoryId]) -> CatalogResult<Vec<Category>>;

    /// Page ordered by name, plus the total before paging
    async fn list_categories(&self, query: &ListQuery) -> CatalogResult<(Vec<Category>, i64)>;

    /// Returns `false` if the row no longer exists
    async fn update_category(&self, category: &Category) -> CatalogResult<bool>;

    /// Deletes the category together with its prompts
    async fn delete_category(&self, id: CategoryId) -> CatalogResult<bool>;

    /// Prompt count per category; ids without prompts map to 0
    async fn count_category_prompts(
        &self,
        ids: &[CategoryId],
        active_only: bool,
    ) -> CatalogResult<HashMap<CategoryId, i64>>;
}

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    async fn insert_tag(&self, tag: &Tag) -> CatalogResult<()>;

    async fn find_tag(&self, id: TagId) -> CatalogResult<Option<Tag>>;

    async fn find_tag_by_name(&self, name: &str) -> CatalogResult<Option<Tag>>;

    /// Tags among `ids` that exist (any order)
    async fn find_tags(&self, ids: &[TagId]) -> CatalogResult<Vec<Tag>>;

    /// Page ordered by name, plus the total before paging
    async fn list_tags(&self, query: &ListQuery) -> CatalogResult<(Vec<Tag>, i64)>;

    async fn update_tag(&self, tag: &Tag) -> CatalogResult<bool>;

    /// Deletes the tag and detaches it from every prompt
    async fn delete_tag(&self, id: TagId) -> CatalogResult<bool>;

    /// Association count per tag; ids without associations map to 0
    async fn count_tag_usage(
        &self,
        ids: &[TagId],
        active_only: bool,
    ) -> CatalogResult<HashMap<TagId, i64>>;
}

/// Prompt repository trait
#[trait_variant::make(PromptRepository: Send)]
pub trait LocalPromptRepository {
    /// Insert the prompt and one association per tag, atomically
    async fn insert_prompt(&self, prompt: &Prompt, tag_ids: &[TagId]) -> CatalogResult<()>;

    async fn find_prompt(&self, id: PromptId) -> CatalogResult<Option<Prompt>>;

    /// Page in `query.sort` order, plus the total before paging
    async fn list_prompts(&self, query: &PromptQuery) -> CatalogResult<(Vec<Prompt>, i64)>;

    /// Write scalar fields; `Some(tag_ids)` also replaces the association set.
    /// Atomic. Returns `false` if the row no longer exists.
    async fn update_prompt(&self, prompt: &Prompt, tag_ids: Option<&[TagId]>)
    -> CatalogResult<bool>;

    /// Deletes the prompt with its associations and likes
    async fn delete_prompt(&self, id: PromptId) -> CatalogResult<bool>;

    /// Tags of each prompt, ordered by name; prompts without tags are absent
    async fn prompt_tags(&self, ids: &[PromptId]) -> CatalogResult<HashMap<PromptId, Vec<Tag>>>;

    /// Record one like per client; `None` if the prompt is unknown or inactive
    async fn record_like(&self, id: PromptId, client_key: &str)
    -> CatalogResult<Option<LikeOutcome>>;

    /// Increment the copy counter; `None` if the prompt is unknown or inactive
    async fn record_copy(&self, id: PromptId) -> CatalogResult<Option<i64>>;
}

/// Everything the catalog use cases need from one store
pub trait CatalogRepository:
    CategoryRepository + TagRepository + PromptRepository + Clone + Send + Sync + 'static
{
}

impl<T> CatalogRepository for T where
    T: CategoryRepository + TagRepository + PromptRepository + Clone + Send + Sync + 'static
{
}
