//! Category Use Cases

use chrono::Utc;
use kernel::id::CategoryId;
use kernel::page::PageRequest;
use std::sync::Arc;

use crate::application::ListPage;
use crate::domain::entities::{Category, CategoryChanges, CategoryView, NewCategory};
use crate::domain::repository::{CategoryRepository, ListQuery};
use crate::error::{CatalogError, CatalogResult};

/// Admin CRUD over categories
pub struct CategoryUseCases<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> CategoryUseCases<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: NewCategory) -> CatalogResult<CategoryView> {
        let category = Category::create(input, Utc::now());
        self.repo.insert_category(&category).await?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");

        Ok(CategoryView {
            category,
            prompt_count: Some(0),
        })
    }

    pub async fn get(&self, id: CategoryId, include_count: bool) -> CatalogResult<CategoryView> {
        let category = self
            .repo
            .find_category(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        let mut views = self.enrich(vec![category], include_count).await?;
        views.pop().ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn list(
        &self,
        page: PageRequest,
        active_only: bool,
        include_count: bool,
    ) -> CatalogResult<ListPage<CategoryView>> {
        let query = ListQuery {
            active_only,
            offset: page.offset(),
            limit: Some(page.limit()),
        };
        let (categories, total) = self.repo.list_categories(&query).await?;

        Ok(ListPage {
            items: self.enrich(categories, include_count).await?,
            total,
            page,
        })
    }

    pub async fn update(&self, id: CategoryId, changes: CategoryChanges) -> CatalogResult<CategoryView> {
        let mut category = self
            .repo
            .find_category(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        category.apply(changes, Utc::now());

        if !self.repo.update_category(&category).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }

        tracing::info!(category_id = %id, "Category updated");

        let mut views = self.enrich(vec![category], true).await?;
        views.pop().ok_or(CatalogError::CategoryNotFound(id))
    }

    /// Refuses while prompts reference the category unless `force`,
    /// in which case those prompts are deleted with it
    pub async fn delete(&self, id: CategoryId, force: bool) -> CatalogResult<()> {
        if self.repo.find_category(id).await?.is_none() {
            return Err(CatalogError::CategoryNotFound(id));
        }

        let prompts = self
            .repo
            .count_category_prompts(&[id], false)
            .await?
            .get(&id)
            .copied()
            .unwrap_or(0);

        if prompts > 0 && !force {
            return Err(CatalogError::CategoryInUse { prompts });
        }

        if !self.repo.delete_category(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }

        tracing::info!(category_id = %id, prompts_deleted = prompts, force, "Category deleted");

        Ok(())
    }

    /// Attach active prompt counts with one aggregate query
    async fn enrich(
        &self,
        categories: Vec<Category>,
        include_count: bool,
    ) -> CatalogResult<Vec<CategoryView>> {
        if !include_count {
            return Ok(categories
                .into_iter()
                .map(|category| CategoryView {
                    category,
                    prompt_count: None,
                })
                .collect());
        }

        let ids: Vec<CategoryId> = categories.iter().map(|c| c.id).collect();
        let counts = self.repo.count_category_prompts(&ids, true).await?;

        Ok(categories
            .into_iter()
            .map(|category| {
                let prompt_count = counts.get(&category.id).copied().unwrap_or(0);
                CategoryView {
                    category,
                    prompt_count: Some(prompt_count),
                }
            })
            .collect())
    }
}
