//! Engagement Use Case
//!
//! Likes and copies. Counters only ever go up.

use kernel::id::PromptId;
use platform::client::ClientIdentity;
use std::sync::Arc;

use crate::domain::entities::LikeOutcome;
use crate::domain::repository::PromptRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct EngagementUseCase<R>
where
    R: PromptRepository,
{
    repo: Arc<R>,
}

impl<R> EngagementUseCase<R>
where
    R: PromptRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// At most one like per client identity; a repeat reports `liked: false`
    pub async fn like(&self, id: PromptId, client: &ClientIdentity) -> CatalogResult<LikeOutcome> {
        let outcome = self
            .repo
            .record_like(id, client.key())
            .await?
            .ok_or(CatalogError::PromptNotFound(id))?;

        if outcome.liked {
            tracing::info!(prompt_id = %id, like_count = outcome.like_count, "Prompt liked");
        } else {
            tracing::debug!(prompt_id = %id, "Repeated like ignored");
        }

        Ok(outcome)
    }

    pub async fn copy(&self, id: PromptId) -> CatalogResult<i64> {
        let copy_count = self
            .repo
            .record_copy(id)
            .await?
            .ok_or(CatalogError::PromptNotFound(id))?;

        tracing::debug!(prompt_id = %id, copy_count, "Prompt copied");

        Ok(copy_count)
    }
}
