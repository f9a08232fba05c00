//! In-Memory Repository
//!
//! Same contract as the PostgreSQL repository (unique names, cascades,
//! foreign-key checks, ordering) behind one `RwLock`. Backs the test suite
//! and local runs without a database.

use chrono::Utc;
use kernel::id::{CategoryId, PromptId, TagId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::entities::{Category, LikeOutcome, Prompt, Tag};
use crate::domain::repository::{
    CategoryRepository, ListQuery, PromptQuery, PromptRepository, TagRepository,
};
use crate::domain::services::compare_prompts;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Default)]
struct State {
    categories: HashMap<CategoryId, Category>,
    tags: HashMap<TagId, Tag>,
    prompts: HashMap<PromptId, Prompt>,
    prompt_tags: HashSet<(PromptId, TagId)>,
    likes: HashSet<(PromptId, String)>,
}

impl State {
    fn remove_prompt(&mut self, id: PromptId) -> bool {
        self.prompt_tags.retain(|(prompt_id, _)| *prompt_id != id);
        self.likes.retain(|(prompt_id, _)| *prompt_id != id);
        self.prompts.remove(&id).is_some()
    }

    fn check_references(&self, prompt: &Prompt, tag_ids: Option<&[TagId]>) -> CatalogResult<()> {
        let category_ok = prompt
            .category_id
            .is_none_or(|id| self.categories.contains_key(&id));
        let tags_ok = tag_ids
            .unwrap_or_default()
            .iter()
            .all(|id| self.tags.contains_key(id));

        if category_ok && tags_ok {
            Ok(())
        } else {
            Err(CatalogError::DanglingReference)
        }
    }

    fn replace_tags(&mut self, id: PromptId, tag_ids: &[TagId]) {
        self.prompt_tags.retain(|(prompt_id, _)| *prompt_id != id);
        self.prompt_tags
            .extend(tag_ids.iter().map(|tag_id| (id, *tag_id)));
    }
}

fn window<T>(items: Vec<T>, offset: i64, limit: Option<i64>) -> Vec<T> {
    let skip = usize::try_from(offset).unwrap_or(0);
    let take = limit
        .map(|l| usize::try_from(l).unwrap_or(0))
        .unwrap_or(usize::MAX);
    items.into_iter().skip(skip).take(take).collect()
}

/// Process-local catalog store
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogRepository {
    state: Arc<RwLock<State>>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryRepository for MemoryCatalogRepository {
    async fn insert_category(&self, category: &Category) -> CatalogResult<()> {
        let mut state = self.state.write();
        if state.categories.values().any(|c| c.name == category.name) {
            return Err(CatalogError::DuplicateCategoryName(category.name.clone()));
        }
        state.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn find_category(&self, id: CategoryId) -> CatalogResult<Option<Category>> {
        Ok(self.state.read().categories.get(&id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        Ok(self
            .state
            .read()
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn find_categories(&self, ids: &[CategoryId]) -> CatalogResult<Vec<Category>> {
        let state = self.state.read();
        Ok(ids
            .iter()
            .filter_map(|id| state.categories.get(id).cloned())
            .collect())
    }

    async fn list_categories(&self, query: &ListQuery) -> CatalogResult<(Vec<Category>, i64)> {
        let state = self.state.read();
        let mut items: Vec<Category> = state
            .categories
            .values()
            .filter(|c| !query.active_only || c.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));

        let total = items.len() as i64;
        Ok((window(items, query.offset, query.limit), total))
    }

    async fn update_category(&self, category: &Category) -> CatalogResult<bool> {
        let mut state = self.state.write();
        if !state.categories.contains_key(&category.id) {
            return Ok(false);
        }
        if state
            .categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(CatalogError::DuplicateCategoryName(category.name.clone()));
        }
        state.categories.insert(category.id, category.clone());
        Ok(true)
    }

    async fn delete_category(&self, id: CategoryId) -> CatalogResult<bool> {
        let mut state = self.state.write();
        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<PromptId> = state
            .prompts
            .values()
            .filter(|p| p.category_id == Some(id))
            .map(|p| p.id)
            .collect();
        for prompt_id in owned {
            state.remove_prompt(prompt_id);
        }
        Ok(true)
    }

    async fn count_category_prompts(
        &self,
        ids: &[CategoryId],
        active_only: bool,
    ) -> CatalogResult<HashMap<CategoryId, i64>> {
        let state = self.state.read();
        let mut counts: HashMap<CategoryId, i64> = ids.iter().map(|id| (*id, 0)).collect();
        for prompt in state.prompts.values() {
            if active_only && !prompt.is_active {
                continue;
            }
            if let Some(count) = prompt.category_id.and_then(|id| counts.get_mut(&id)) {
                *count += 1;
            }
        }
        Ok(counts)
    }
}

impl TagRepository for MemoryCatalogRepository {
    async fn insert_tag(&self, tag: &Tag) -> CatalogResult<()> {
        let mut state = self.state.write();
        if state.tags.values().any(|t| t.name == tag.name) {
            return Err(CatalogError::DuplicateTagName(tag.name.clone()));
        }
        state.tags.insert(tag.id, tag.clone());
        Ok(())
    }

    async fn find_tag(&self, id: TagId) -> CatalogResult<Option<Tag>> {
        Ok(self.state.read().tags.get(&id).cloned())
    }

    async fn find_tag_by_name(&self, name: &str) -> CatalogResult<Option<Tag>> {
        Ok(self
            .state
            .read()
            .tags
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn find_tags(&self, ids: &[TagId]) -> CatalogResult<Vec<Tag>> {
        let state = self.state.read();
        Ok(ids
            .iter()
            .filter_map(|id| state.tags.get(id).cloned())
            .collect())
    }

    async fn list_tags(&self, query: &ListQuery) -> CatalogResult<(Vec<Tag>, i64)> {
        let state = self.state.read();
        let mut items: Vec<Tag> = state
            .tags
            .values()
            .filter(|t| !query.active_only || t.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));

        let total = items.len() as i64;
        Ok((window(items, query.offset, query.limit), total))
    }

    async fn update_tag(&self, tag: &Tag) -> CatalogResult<bool> {
        let mut state = self.state.write();
        if !state.tags.contains_key(&tag.id) {
            return Ok(false);
        }
        if state
            .tags
            .values()
            .any(|t| t.id != tag.id && t.name == tag.name)
        {
            return Err(CatalogError::DuplicateTagName(tag.name.clone()));
        }
        state.tags.insert(tag.id, tag.clone());
        Ok(true)
    }

    async fn delete_tag(&self, id: TagId) -> CatalogResult<bool> {
        let mut state = self.state.write();
        if state.tags.remove(&id).is_none() {
            return Ok(false);
        }
        state.prompt_tags.retain(|(_, tag_id)| *tag_id != id);
        Ok(true)
    }

    async fn count_tag_usage(
        &self,
        ids: &[TagId],
        active_only: bool,
    ) -> CatalogResult<HashMap<TagId, i64>> {
        let state = self.state.read();
        let mut counts: HashMap<TagId, i64> = ids.iter().map(|id| (*id, 0)).collect();
        for (prompt_id, tag_id) in &state.prompt_tags {
            let active = state
                .prompts
                .get(prompt_id)
                .is_some_and(|p| p.is_active);
            if active_only && !active {
                continue;
            }
            if let Some(count) = counts.get_mut(tag_id) {
                *count += 1;
            }
        }
        Ok(counts)
    }
}

impl PromptRepository for MemoryCatalogRepository {
    async fn insert_prompt(&self, prompt: &Prompt, tag_ids: &[TagId]) -> CatalogResult<()> {
        let mut state = self.state.write();
        state.check_references(prompt, Some(tag_ids))?;
        state.prompts.insert(prompt.id, prompt.clone());
        state.replace_tags(prompt.id, tag_ids);
        Ok(())
    }

    async fn find_prompt(&self, id: PromptId) -> CatalogResult<Option<Prompt>> {
        Ok(self.state.read().prompts.get(&id).cloned())
    }

    async fn list_prompts(&self, query: &PromptQuery) -> CatalogResult<(Vec<Prompt>, i64)> {
        let state = self.state.read();
        let mut items: Vec<Prompt> = state
            .prompts
            .values()
            .filter(|p| query.category_id.is_none_or(|id| p.category_id == Some(id)))
            .filter(|p| {
                query
                    .tag_id
                    .is_none_or(|tag_id| state.prompt_tags.contains(&(p.id, tag_id)))
            })
            .filter(|p| query.is_featured.is_none_or(|f| p.is_featured == f))
            .filter(|p| query.is_active.is_none_or(|a| p.is_active == a))
            .cloned()
            .collect();

        let now = Utc::now();
        items.sort_by(|a, b| compare_prompts(query.sort, a, b, now));

        let total = items.len() as i64;
        Ok((window(items, query.offset, Some(query.limit)), total))
    }

    async fn update_prompt(&self, prompt: &Prompt, tag_ids: Option<&[TagId]>) -> CatalogResult<bool> {
        let mut state = self.state.write();
        if !state.prompts.contains_key(&prompt.id) {
            return Ok(false);
        }
        state.check_references(prompt, tag_ids)?;
        state.prompts.insert(prompt.id, prompt.clone());
        if let Some(tag_ids) = tag_ids {
            state.replace_tags(prompt.id, tag_ids);
        }
        Ok(true)
    }

    async fn delete_prompt(&self, id: PromptId) -> CatalogResult<bool> {
        Ok(self.state.write().remove_prompt(id))
    }

    async fn prompt_tags(&self, ids: &[PromptId]) -> CatalogResult<HashMap<PromptId, Vec<Tag>>> {
        let state = self.state.read();
        let wanted: HashSet<&PromptId> = ids.iter().collect();
        let mut result: HashMap<PromptId, Vec<Tag>> = HashMap::new();

        for (prompt_id, tag_id) in &state.prompt_tags {
            if !wanted.contains(prompt_id) {
                continue;
            }
            if let Some(tag) = state.tags.get(tag_id) {
                result.entry(*prompt_id).or_default().push(tag.clone());
            }
        }
        for tags in result.values_mut() {
            tags.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(result)
    }

    async fn record_like(&self, id: PromptId, client_key: &str) -> CatalogResult<Option<LikeOutcome>> {
        let mut state = self.state.write();
        if !state.prompts.get(&id).is_some_and(|p| p.is_active) {
            return Ok(None);
        }

        let liked = state.likes.insert((id, client_key.to_string()));
        let Some(prompt) = state.prompts.get_mut(&id) else {
            return Ok(None);
        };
        if liked {
            prompt.like_count += 1;
        }
        Ok(Some(LikeOutcome {
            liked,
            like_count: prompt.like_count,
        }))
    }

    async fn record_copy(&self, id: PromptId) -> CatalogResult<Option<i64>> {
        let mut state = self.state.write();
        Ok(state
            .prompts
            .get_mut(&id)
            .filter(|p| p.is_active)
            .map(|p| {
                p.copy_count += 1;
                p.copy_count
            }))
    }
}
