//! Prompt Use Cases
//!
//! References are checked before any write: the category (if given) and
//! every tag id must exist, otherwise nothing is written. The store's own
//! foreign keys catch a reference deleted between check and write.

use chrono::Utc;
use kernel::id::{CategoryId, PromptId, TagId};
use kernel::page::PageRequest;
use kernel::patch::Patch;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::application::ListPage;
use crate::domain::entities::{NewPrompt, Prompt, PromptChanges, PromptView};
use crate::domain::repository::{CategoryRepository, PromptQuery, PromptRepository, TagRepository};
use crate::domain::value_objects::{PromptSort, dedup_tag_ids};
use crate::error::{CatalogError, CatalogResult};

/// Admin listing filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptFilter {
    pub category_id: Option<CategoryId>,
    pub tag_id: Option<TagId>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// Admin CRUD over prompts
pub struct PromptUseCases<R>
where
    R: PromptRepository + CategoryRepository + TagRepository,
{
    repo: Arc<R>,
}

impl<R> PromptUseCases<R>
where
    R: PromptRepository + CategoryRepository + TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, mut input: NewPrompt) -> CatalogResult<PromptView> {
        input.tag_ids = dedup_tag_ids(std::mem::take(&mut input.tag_ids));

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }
        self.ensure_tags(&input.tag_ids).await?;

        let prompt = Prompt::create(&input, Utc::now());
        self.repo.insert_prompt(&prompt, &input.tag_ids).await?;

        tracing::info!(
            prompt_id = %prompt.id,
            tags = input.tag_ids.len(),
            "Prompt created"
        );

        self.view(prompt, true).await
    }

    pub async fn get(&self, id: PromptId, include_relations: bool) -> CatalogResult<PromptView> {
        let prompt = self
            .repo
            .find_prompt(id)
            .await?
            .ok_or(CatalogError::PromptNotFound(id))?;
        self.view(prompt, include_relations).await
    }

    /// Newest first
    pub async fn list(
        &self,
        filter: PromptFilter,
        page: PageRequest,
        include_relations: bool,
    ) -> CatalogResult<ListPage<PromptView>> {
        let query = PromptQuery {
            category_id: filter.category_id,
            tag_id: filter.tag_id,
            is_featured: filter.is_featured,
            is_active: filter.is_active,
            sort: PromptSort::CreatedAt,
            offset: page.offset(),
            limit: page.limit(),
        };
        let (prompts, total) = self.repo.list_prompts(&query).await?;

        Ok(ListPage {
            items: load_relations(self.repo.as_ref(), prompts, include_relations).await?,
            total,
            page,
        })
    }

    pub async fn update(&self, id: PromptId, mut changes: PromptChanges) -> CatalogResult<PromptView> {
        let mut prompt = self
            .repo
            .find_prompt(id)
            .await?
            .ok_or(CatalogError::PromptNotFound(id))?;

        if let Patch::Value(category_id) = changes.category_id {
            self.ensure_category(category_id).await?;
        }
        if let Some(tag_ids) = changes.tag_ids.take() {
            let tag_ids = dedup_tag_ids(tag_ids);
            self.ensure_tags(&tag_ids).await?;
            changes.tag_ids = Some(tag_ids);
        }

        prompt.apply(&changes, Utc::now());

        if !self
            .repo
            .update_prompt(&prompt, changes.tag_ids.as_deref())
            .await?
        {
            return Err(CatalogError::PromptNotFound(id));
        }

        tracing::info!(
            prompt_id = %id,
            tags_replaced = changes.tag_ids.is_some(),
            "Prompt updated"
        );

        self.view(prompt, true).await
    }

    pub async fn delete(&self, id: PromptId) -> CatalogResult<()> {
        if !self.repo.delete_prompt(id).await? {
            return Err(CatalogError::PromptNotFound(id));
        }

        tracing::info!(prompt_id = %id, "Prompt deleted");

        Ok(())
    }

    async fn ensure_category(&self, id: CategoryId) -> CatalogResult<()> {
        match self.repo.find_category(id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::MissingCategory(id)),
        }
    }

    /// Fails on the first id (in request order) that does not exist
    async fn ensure_tags(&self, ids: &[TagId]) -> CatalogResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let found: HashSet<TagId> = self
            .repo
            .find_tags(ids)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();

        match ids.iter().find(|id| !found.contains(*id)) {
            Some(missing) => Err(CatalogError::MissingTag(*missing)),
            None => Ok(()),
        }
    }

    async fn view(&self, prompt: Prompt, include_relations: bool) -> CatalogResult<PromptView> {
        let id = prompt.id;
        load_relations(self.repo.as_ref(), vec![prompt], include_relations)
            .await?
            .pop()
            .ok_or(CatalogError::PromptNotFound(id))
    }
}

/// Attach category and tags with two batched lookups, preserving order
pub(crate) async fn load_relations<R>(
    repo: &R,
    prompts: Vec<Prompt>,
    include_relations: bool,
) -> CatalogResult<Vec<PromptView>>
where
    R: PromptRepository + CategoryRepository,
{
    if !include_relations || prompts.is_empty() {
        return Ok(prompts
            .into_iter()
            .map(|prompt| PromptView {
                prompt,
                category: None,
                tags: Vec::new(),
            })
            .collect());
    }

    let mut category_ids: Vec<CategoryId> = prompts.iter().filter_map(|p| p.category_id).collect();
    category_ids.sort();
    category_ids.dedup();

    let categories: HashMap<CategoryId, _> = repo
        .find_categories(&category_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let prompt_ids: Vec<PromptId> = prompts.iter().map(|p| p.id).collect();
    let mut tags = repo.prompt_tags(&prompt_ids).await?;

    Ok(prompts
        .into_iter()
        .map(|prompt| PromptView {
            category: prompt
                .category_id
                .and_then(|id| categories.get(&id).cloned()),
            tags: tags.remove(&prompt.id).unwrap_or_default(),
            prompt,
        })
        .collect())
}
