//! Public Listing Use Case
//!
//! Read-only views for anonymous visitors. Only active prompts are ever
//! returned. The homepage ignores an unknown category or tag name and lists
//! without that filter; the dedicated category and tag pages answer 404.

use kernel::id::{CategoryId, PromptId};
use kernel::page::{PageRequest, Pagination};
use std::sync::Arc;

use crate::application::prompts::load_relations;
use crate::domain::entities::{Category, CategoryView, PromptView, Tag, TagView};
use crate::domain::repository::{
    CategoryRepository, ListQuery, PromptQuery, PromptRepository, TagRepository,
};
use crate::domain::value_objects::PromptSort;
use crate::error::{CatalogError, CatalogResult};

/// Homepage query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: PageRequest,
    pub sort: PromptSort,
    /// Category name
    pub category: Option<String>,
    /// Tag name
    pub tag: Option<String>,
}

/// One page of public prompts with render metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub items: Vec<PromptView>,
    pub pagination: Pagination,
    pub sort: PromptSort,
    /// The category filter that was applied, if any
    pub category: Option<Category>,
    /// The tag filter that was applied, if any
    pub tag: Option<Tag>,
}

pub struct PublicListingUseCase<R>
where
    R: PromptRepository + CategoryRepository + TagRepository,
{
    repo: Arc<R>,
}

impl<R> PublicListingUseCase<R>
where
    R: PromptRepository + CategoryRepository + TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn home(&self, query: ListingQuery) -> CatalogResult<ListingPage> {
        let category = match query.category.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => self.repo.find_category_by_name(name).await?,
            None => None,
        };
        let tag = match query.tag.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => self.repo.find_tag_by_name(name).await?,
            None => None,
        };

        self.page(query.page, query.sort, category, tag).await
    }

    pub async fn by_category(
        &self,
        name: &str,
        page: PageRequest,
        sort: PromptSort,
    ) -> CatalogResult<ListingPage> {
        let category = self
            .repo
            .find_category_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::CategoryNameNotFound(name.to_string()))?;

        self.page(page, sort, Some(category), None).await
    }

    pub async fn by_tag(&self, name: &str, page: PageRequest, sort: PromptSort) -> CatalogResult<ListingPage> {
        let tag = self
            .repo
            .find_tag_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::TagNameNotFound(name.to_string()))?;

        self.page(page, sort, None, Some(tag)).await
    }

    /// A single active prompt with its relations
    pub async fn prompt(&self, id: PromptId) -> CatalogResult<PromptView> {
        let prompt = self
            .repo
            .find_prompt(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(CatalogError::PromptNotFound(id))?;

        load_relations(self.repo.as_ref(), vec![prompt], true)
            .await?
            .pop()
            .ok_or(CatalogError::PromptNotFound(id))
    }

    /// Active categories by name, with active prompt counts
    pub async fn categories(&self) -> CatalogResult<Vec<CategoryView>> {
        let query = ListQuery {
            active_only: true,
            offset: 0,
            limit: None,
        };
        let (categories, _) = self.repo.list_categories(&query).await?;
        let ids: Vec<CategoryId> = categories.iter().map(|c| c.id).collect();
        let counts = self.repo.count_category_prompts(&ids, true).await?;

        Ok(categories
            .into_iter()
            .map(|category| CategoryView {
                prompt_count: Some(counts.get(&category.id).copied().unwrap_or(0)),
                category,
            })
            .collect())
    }

    /// Active tags by name, with usage counts
    pub async fn tags(&self) -> CatalogResult<Vec<TagView>> {
        let query = ListQuery {
            active_only: true,
            offset: 0,
            limit: None,
        };
        let (tags, _) = self.repo.list_tags(&query).await?;
        let ids: Vec<_> = tags.iter().map(|t| t.id).collect();
        let counts = self.repo.count_tag_usage(&ids, true).await?;

        Ok(tags
            .into_iter()
            .map(|tag| TagView {
                usage_count: Some(counts.get(&tag.id).copied().unwrap_or(0)),
                tag,
            })
            .collect())
    }

    async fn page(
        &self,
        page: PageRequest,
        sort: PromptSort,
        category: Option<Category>,
        tag: Option<Tag>,
    ) -> CatalogResult<ListingPage> {
        let query = PromptQuery {
            category_id: category.as_ref().map(|c| c.id),
            tag_id: tag.as_ref().map(|t| t.id),
            is_featured: None,
            is_active: Some(true),
            sort,
            offset: page.offset(),
            limit: page.limit(),
        };
        let (prompts, total) = self.repo.list_prompts(&query).await?;

        Ok(ListingPage {
            items: load_relations(self.repo.as_ref(), prompts, true).await?,
            pagination: Pagination::new(page, total),
            sort,
            category,
            tag,
        })
    }
}
