//! Tag Use Cases

use chrono::Utc;
use kernel::id::TagId;
use kernel::page::PageRequest;
use std::sync::Arc;

use crate::application::ListPage;
use crate::domain::entities::{NewTag, Tag, TagChanges, TagView};
use crate::domain::repository::{ListQuery, TagRepository};
use crate::error::{CatalogError, CatalogResult};

/// Admin CRUD over tags
pub struct TagUseCases<R>
where
    R: TagRepository,
{
    repo: Arc<R>,
}

impl<R> TagUseCases<R>
where
    R: TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: NewTag) -> CatalogResult<TagView> {
        let tag = Tag::create(input, Utc::now());
        self.repo.insert_tag(&tag).await?;

        tracing::info!(tag_id = %tag.id, name = %tag.name, "Tag created");

        Ok(TagView {
            tag,
            usage_count: Some(0),
        })
    }

    pub async fn get(&self, id: TagId, include_count: bool) -> CatalogResult<TagView> {
        let tag = self
            .repo
            .find_tag(id)
            .await?
            .ok_or(CatalogError::TagNotFound(id))?;

        let mut views = self.enrich(vec![tag], include_count).await?;
        views.pop().ok_or(CatalogError::TagNotFound(id))
    }

    pub async fn list(
        &self,
        page: PageRequest,
        active_only: bool,
        include_count: bool,
    ) -> CatalogResult<ListPage<TagView>> {
        let query = ListQuery {
            active_only,
            offset: page.offset(),
            limit: Some(page.limit()),
        };
        let (tags, total) = self.repo.list_tags(&query).await?;

        Ok(ListPage {
            items: self.enrich(tags, include_count).await?,
            total,
            page,
        })
    }

    pub async fn update(&self, id: TagId, changes: TagChanges) -> CatalogResult<TagView> {
        let mut tag = self
            .repo
            .find_tag(id)
            .await?
            .ok_or(CatalogError::TagNotFound(id))?;

        tag.apply(changes, Utc::now());

        if !self.repo.update_tag(&tag).await? {
            return Err(CatalogError::TagNotFound(id));
        }

        tracing::info!(tag_id = %id, "Tag updated");

        let mut views = self.enrich(vec![tag], true).await?;
        views.pop().ok_or(CatalogError::TagNotFound(id))
    }

    /// Refuses while any prompt carries the tag unless `force`,
    /// in which case the associations are removed first
    pub async fn delete(&self, id: TagId, force: bool) -> CatalogResult<()> {
        if self.repo.find_tag(id).await?.is_none() {
            return Err(CatalogError::TagNotFound(id));
        }

        let associations = self
            .repo
            .count_tag_usage(&[id], false)
            .await?
            .get(&id)
            .copied()
            .unwrap_or(0);

        if associations > 0 && !force {
            return Err(CatalogError::TagInUse { associations });
        }

        if !self.repo.delete_tag(id).await? {
            return Err(CatalogError::TagNotFound(id));
        }

        tracing::info!(tag_id = %id, associations_removed = associations, force, "Tag deleted");

        Ok(())
    }

    async fn enrich(&self, tags: Vec<Tag>, include_count: bool) -> CatalogResult<Vec<TagView>> {
        if !include_count {
            return Ok(tags
                .into_iter()
                .map(|tag| TagView {
                    tag,
                    usage_count: None,
                })
                .collect());
        }

        let ids: Vec<TagId> = tags.iter().map(|t| t.id).collect();
        let counts = self.repo.count_tag_usage(&ids, true).await?;

        Ok(tags
            .into_iter()
            .map(|tag| {
                let usage_count = counts.get(&tag.id).copied().unwrap_or(0);
                TagView {
                    tag,
                    usage_count: Some(usage_count),
                }
            })
            .collect())
    }
}
