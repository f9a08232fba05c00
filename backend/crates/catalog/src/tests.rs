//! Unit tests for Catalog crate

#[cfg(test)]
mod fixtures {
    use crate::application::{CategoryUseCases, PromptUseCases, TagUseCases};
    use crate::domain::entities::{Category, NewCategory, NewPrompt, NewTag, PromptView, Tag};
    use crate::domain::value_objects::{CategoryName, PromptContent, PromptTitle, TagColor, TagName};
    use crate::infra::memory::MemoryCatalogRepository;
    use kernel::id::{CategoryId, TagId};
    use std::sync::Arc;

    pub fn repo() -> Arc<MemoryCatalogRepository> {
        Arc::new(MemoryCatalogRepository::new())
    }

    pub async fn category(repo: &Arc<MemoryCatalogRepository>, name: &str) -> Category {
        CategoryUseCases::new(repo.clone())
            .create(NewCategory {
                name: CategoryName::parse(name).unwrap(),
                description: None,
                is_active: true,
            })
            .await
            .unwrap()
            .category
    }

    pub async fn tag(repo: &Arc<MemoryCatalogRepository>, name: &str) -> Tag {
        TagUseCases::new(repo.clone())
            .create(NewTag {
                name: TagName::parse(name).unwrap(),
                color: TagColor::default(),
                is_active: true,
            })
            .await
            .unwrap()
            .tag
    }

    pub fn new_prompt(title: &str, category_id: Option<CategoryId>, tag_ids: Vec<TagId>) -> NewPrompt {
        NewPrompt {
            title: PromptTitle::parse(title).unwrap(),
            content: PromptContent::parse("hello").unwrap(),
            description: None,
            category_id,
            tag_ids,
            is_featured: false,
            is_active: true,
        }
    }

    pub async fn prompt(
        repo: &Arc<MemoryCatalogRepository>,
        title: &str,
        category_id: Option<CategoryId>,
        tag_ids: Vec<TagId>,
    ) -> PromptView {
        PromptUseCases::new(repo.clone())
            .create(new_prompt(title, category_id, tag_ids))
            .await
            .unwrap()
    }

    pub fn tag_names(view: &PromptView) -> Vec<&str> {
        view.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

#[cfg(test)]
mod category_tests {
    use super::fixtures::*;
    use crate::application::{CategoryUseCases, PromptFilter, PromptUseCases};
    use crate::domain::entities::{CategoryChanges, NewCategory};
    use crate::domain::value_objects::CategoryName;
    use crate::error::CatalogError;
    use kernel::id::CategoryId;
    use kernel::page::PageRequest;

    fn page() -> PageRequest {
        PageRequest::new(1, 20, 100).unwrap()
    }

    #[tokio::test]
    async fn test_new_category_has_zero_prompts() {
        let repo = repo();
        let view = CategoryUseCases::new(repo.clone())
            .create(NewCategory {
                name: CategoryName::parse("Writing").unwrap(),
                description: None,
                is_active: true,
            })
            .await
            .unwrap();
        assert_eq!(view.prompt_count, Some(0));
    }

    #[tokio::test]
    async fn test_duplicate_name_keeps_single_row() {
        let repo = repo();
        category(&repo, "Writing").await;

        let err = CategoryUseCases::new(repo.clone())
            .create(NewCategory {
                name: CategoryName::parse("Writing").unwrap(),
                description: None,
                is_active: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategoryName(ref n) if n == "Writing"));

        let list = CategoryUseCases::new(repo.clone())
            .list(page(), false, false)
            .await
            .unwrap();
        assert_eq!(list.total, 1);
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_fails() {
        let repo = repo();
        category(&repo, "Writing").await;
        let other = category(&repo, "Coding").await;

        let err = CategoryUseCases::new(repo.clone())
            .update(
                other.id,
                CategoryChanges {
                    name: Some(CategoryName::parse("Writing").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategoryName(_)));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_omitted_fields() {
        let repo = repo();
        let created = category(&repo, "Writing").await;

        let updated = CategoryUseCases::new(repo.clone())
            .update(
                created.id,
                CategoryChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.category.name, "Writing");
        assert!(!updated.category.is_active);
        assert!(updated.category.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_category_is_not_found() {
        let err = CategoryUseCases::new(repo())
            .update(CategoryId::new(), CategoryChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_in_use_requires_force() {
        let repo = repo();
        let c1 = category(&repo, "C1").await;
        prompt(&repo, "P1", Some(c1.id), vec![]).await;
        prompt(&repo, "P2", Some(c1.id), vec![]).await;

        let categories = CategoryUseCases::new(repo.clone());
        let err = categories.delete(c1.id, false).await.unwrap_err();
        assert!(matches!(err, CatalogError::CategoryInUse { prompts: 2 }));

        // Nothing was removed
        assert!(categories.get(c1.id, false).await.is_ok());
        let prompts = PromptUseCases::new(repo.clone())
            .list(PromptFilter::default(), page(), false)
            .await
            .unwrap();
        assert_eq!(prompts.total, 2);

        categories.delete(c1.id, true).await.unwrap();
        assert!(matches!(
            categories.get(c1.id, false).await,
            Err(CatalogError::CategoryNotFound(_))
        ));
        let prompts = PromptUseCases::new(repo.clone())
            .list(PromptFilter::default(), page(), false)
            .await
            .unwrap();
        assert_eq!(prompts.total, 0);
    }

    #[tokio::test]
    async fn test_active_only_listing() {
        let repo = repo();
        category(&repo, "Visible").await;
        let hidden = category(&repo, "Hidden").await;
        CategoryUseCases::new(repo.clone())
            .update(
                hidden.id,
                CategoryChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let list = CategoryUseCases::new(repo.clone())
            .list(page(), true, true)
            .await
            .unwrap();
        assert_eq!(list.total, 1);
        assert!(list.items.iter().all(|v| v.category.is_active));
    }

    #[tokio::test]
    async fn test_counts_only_active_prompts() {
        let repo = repo();
        let c1 = category(&repo, "C1").await;
        prompt(&repo, "Live", Some(c1.id), vec![]).await;
        let mut hidden = super::fixtures::new_prompt("Hidden", Some(c1.id), vec![]);
        hidden.is_active = false;
        PromptUseCases::new(repo.clone()).create(hidden).await.unwrap();

        let view = CategoryUseCases::new(repo.clone())
            .get(c1.id, true)
            .await
            .unwrap();
        assert_eq!(view.prompt_count, Some(1));
    }

    #[tokio::test]
    async fn test_list_pages() {
        let repo = repo();
        for name in ["a", "b", "c", "d", "e"] {
            category(&repo, name).await;
        }

        let list = CategoryUseCases::new(repo.clone())
            .list(PageRequest::new(2, 2, 100).unwrap(), false, false)
            .await
            .unwrap();
        let names: Vec<_> = list.items.iter().map(|v| v.category.name.as_str()).collect();
        assert_eq!(names, ["c", "d"]);
        assert_eq!(list.total, 5);
        assert!(list.has_next());
        assert!(list.has_prev());
    }
}

#[cfg(test)]
mod tag_tests {
    use super::fixtures::*;
    use crate::application::{PromptUseCases, TagUseCases};
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_delete_in_use_tag_requires_force_then_detaches() {
        let repo = repo();
        let t1 = tag(&repo, "T1").await;
        let p = prompt(&repo, "P1", None, vec![t1.id]).await;

        let tags = TagUseCases::new(repo.clone());
        let err = tags.delete(t1.id, false).await.unwrap_err();
        assert!(matches!(err, CatalogError::TagInUse { associations: 1 }));

        tags.delete(t1.id, true).await.unwrap();

        let view = PromptUseCases::new(repo.clone())
            .get(p.prompt.id, true)
            .await
            .unwrap();
        assert!(view.tags.is_empty());
    }

    #[tokio::test]
    async fn test_usage_count() {
        let repo = repo();
        let t1 = tag(&repo, "T1").await;
        prompt(&repo, "P1", None, vec![t1.id]).await;
        prompt(&repo, "P2", None, vec![t1.id]).await;

        let view = TagUseCases::new(repo.clone()).get(t1.id, true).await.unwrap();
        assert_eq!(view.usage_count, Some(2));

        let view = TagUseCases::new(repo.clone()).get(t1.id, false).await.unwrap();
        assert_eq!(view.usage_count, None);
    }
}

#[cfg(test)]
mod prompt_tests {
    use super::fixtures::*;
    use crate::application::{CategoryUseCases, PromptFilter, PromptUseCases};
    use crate::domain::entities::PromptChanges;
    use crate::error::CatalogError;
    use kernel::id::{CategoryId, TagId};
    use kernel::page::PageRequest;
    use kernel::patch::Patch;

    fn page() -> PageRequest {
        PageRequest::new(1, 20, 100).unwrap()
    }

    #[tokio::test]
    async fn test_create_with_relations() {
        let repo = repo();
        let c1 = category(&repo, "C1").await;
        let t1 = tag(&repo, "T1").await;

        let view = prompt(&repo, "P1", Some(c1.id), vec![t1.id]).await;
        assert_eq!(view.category.as_ref().map(|c| c.name.as_str()), Some("C1"));
        assert_eq!(tag_names(&view), ["T1"]);
        assert_eq!(view.prompt.like_count, 0);
        assert_eq!(view.prompt.copy_count, 0);

        let count = CategoryUseCases::new(repo.clone())
            .get(c1.id, true)
            .await
            .unwrap()
            .prompt_count;
        assert_eq!(count, Some(1));
    }

    #[tokio::test]
    async fn test_missing_category_writes_nothing() {
        let repo = repo();
        let prompts = PromptUseCases::new(repo.clone());
        let missing = CategoryId::new();

        let err = prompts
            .create(new_prompt("P1", Some(missing), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingCategory(id) if id == missing));

        let list = prompts.list(PromptFilter::default(), page(), false).await.unwrap();
        assert_eq!(list.total, 0);
    }

    #[tokio::test]
    async fn test_missing_tag_writes_nothing() {
        let repo = repo();
        let t1 = tag(&repo, "T1").await;
        let missing = TagId::new();
        let prompts = PromptUseCases::new(repo.clone());

        let err = prompts
            .create(new_prompt("P1", None, vec![t1.id, missing]))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingTag(id) if id == missing));

        let list = prompts.list(PromptFilter::default(), page(), false).await.unwrap();
        assert_eq!(list.total, 0);
    }

    #[tokio::test]
    async fn test_duplicate_tag_ids_collapse() {
        let repo = repo();
        let t1 = tag(&repo, "T1").await;

        let view = prompt(&repo, "P1", None, vec![t1.id, t1.id]).await;
        assert_eq!(tag_names(&view), ["T1"]);
    }

    #[tokio::test]
    async fn test_tag_ids_replace_whole_set() {
        let repo = repo();
        let a = tag(&repo, "a").await;
        let b = tag(&repo, "b").await;
        let c = tag(&repo, "c").await;
        let created = prompt(&repo, "P1", None, vec![c.id]).await;
        let prompts = PromptUseCases::new(repo.clone());

        let cleared = prompts
            .update(
                created.prompt.id,
                PromptChanges {
                    tag_ids: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.tags.is_empty());

        for _ in 0..2 {
            let replaced = prompts
                .update(
                    created.prompt.id,
                    PromptChanges {
                        tag_ids: Some(vec![b.id, a.id]),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(tag_names(&replaced), ["a", "b"]);
        }
    }

    #[tokio::test]
    async fn test_absent_tag_ids_keep_associations() {
        let repo = repo();
        let t1 = tag(&repo, "T1").await;
        let created = prompt(&repo, "P1", None, vec![t1.id]).await;

        let updated = PromptUseCases::new(repo.clone())
            .update(
                created.prompt.id,
                PromptChanges {
                    is_featured: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.prompt.is_featured);
        assert_eq!(tag_names(&updated), ["T1"]);
    }

    #[tokio::test]
    async fn test_update_with_missing_tag_changes_nothing() {
        let repo = repo();
        let t1 = tag(&repo, "T1").await;
        let created = prompt(&repo, "P1", None, vec![t1.id]).await;
        let prompts = PromptUseCases::new(repo.clone());

        let err = prompts
            .update(
                created.prompt.id,
                PromptChanges {
                    title: Some(crate::domain::value_objects::PromptTitle::parse("Renamed").unwrap()),
                    tag_ids: Some(vec![TagId::new()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingTag(_)));

        let view = prompts.get(created.prompt.id, true).await.unwrap();
        assert_eq!(view.prompt.title, "P1");
        assert_eq!(tag_names(&view), ["T1"]);
    }

    #[tokio::test]
    async fn test_clear_category() {
        let repo = repo();
        let c1 = category(&repo, "C1").await;
        let created = prompt(&repo, "P1", Some(c1.id), vec![]).await;

        let updated = PromptUseCases::new(repo.clone())
            .update(
                created.prompt.id,
                PromptChanges {
                    category_id: Patch::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.prompt.category_id, None);
        assert!(updated.category.is_none());
    }

    #[tokio::test]
    async fn test_filters() {
        let repo = repo();
        let c1 = category(&repo, "C1").await;
        let t1 = tag(&repo, "T1").await;
        prompt(&repo, "in category", Some(c1.id), vec![]).await;
        prompt(&repo, "tagged", None, vec![t1.id]).await;
        prompt(&repo, "plain", None, vec![]).await;
        let prompts = PromptUseCases::new(repo.clone());

        let by_category = prompts
            .list(
                PromptFilter {
                    category_id: Some(c1.id),
                    ..Default::default()
                },
                page(),
                false,
            )
            .await
            .unwrap();
        assert_eq!(by_category.total, 1);
        assert_eq!(by_category.items[0].prompt.title, "in category");

        let by_tag = prompts
            .list(
                PromptFilter {
                    tag_id: Some(t1.id),
                    ..Default::default()
                },
                page(),
                true,
            )
            .await
            .unwrap();
        assert_eq!(by_tag.total, 1);
        assert_eq!(by_tag.items[0].prompt.title, "tagged");
    }

    #[tokio::test]
    async fn test_delete_prompt() {
        let repo = repo();
        let created = prompt(&repo, "P1", None, vec![]).await;
        let prompts = PromptUseCases::new(repo.clone());

        prompts.delete(created.prompt.id).await.unwrap();
        assert!(matches!(
            prompts.delete(created.prompt.id).await,
            Err(CatalogError::PromptNotFound(_))
        ));
    }
}

#[cfg(test)]
mod engagement_tests {
    use super::fixtures::*;
    use crate::application::{EngagementUseCase, PromptUseCases};
    use crate::domain::entities::PromptChanges;
    use crate::error::CatalogError;
    use platform::client::ClientIdentity;

    #[tokio::test]
    async fn test_one_like_per_client() {
        let repo = repo();
        let p = prompt(&repo, "P1", None, vec![]).await;
        let engagement = EngagementUseCase::new(repo.clone());
        let alice = ClientIdentity::from_address("10.0.0.1");
        let bob = ClientIdentity::from_address("10.0.0.2");

        let first = engagement.like(p.prompt.id, &alice).await.unwrap();
        assert!(first.liked);
        assert_eq!(first.like_count, 1);

        let repeat = engagement.like(p.prompt.id, &alice).await.unwrap();
        assert!(!repeat.liked);
        assert_eq!(repeat.like_count, 1);

        let other = engagement.like(p.prompt.id, &bob).await.unwrap();
        assert!(other.liked);
        assert_eq!(other.like_count, 2);
    }

    #[tokio::test]
    async fn test_copy_increments() {
        let repo = repo();
        let p = prompt(&repo, "P1", None, vec![]).await;
        let engagement = EngagementUseCase::new(repo.clone());

        assert_eq!(engagement.copy(p.prompt.id).await.unwrap(), 1);
        assert_eq!(engagement.copy(p.prompt.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_inactive_prompt_cannot_be_liked_or_copied() {
        let repo = repo();
        let p = prompt(&repo, "P1", None, vec![]).await;
        PromptUseCases::new(repo.clone())
            .update(
                p.prompt.id,
                PromptChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let engagement = EngagementUseCase::new(repo.clone());
        let client = ClientIdentity::from_address("10.0.0.1");
        assert!(matches!(
            engagement.like(p.prompt.id, &client).await,
            Err(CatalogError::PromptNotFound(_))
        ));
        assert!(matches!(
            engagement.copy(p.prompt.id).await,
            Err(CatalogError::PromptNotFound(_))
        ));
    }
}

#[cfg(test)]
mod listing_tests {
    use super::fixtures::*;
    use crate::application::{
        EngagementUseCase, ListingQuery, PromptUseCases, PublicListingUseCase,
    };
    use crate::domain::entities::PromptChanges;
    use crate::domain::value_objects::PromptSort;
    use crate::error::CatalogError;
    use kernel::page::PageRequest;
    use platform::client::ClientIdentity;

    fn page() -> PageRequest {
        PageRequest::new(1, 20, 50).unwrap()
    }

    fn home(category: Option<&str>, sort: PromptSort) -> ListingQuery {
        ListingQuery {
            page: page(),
            sort,
            category: category.map(str::to_string),
            tag: None,
        }
    }

    #[tokio::test]
    async fn test_inactive_prompts_hidden() {
        let repo = repo();
        prompt(&repo, "visible", None, vec![]).await;
        let hidden = prompt(&repo, "hidden", None, vec![]).await;
        PromptUseCases::new(repo.clone())
            .update(
                hidden.prompt.id,
                PromptChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let listing = PublicListingUseCase::new(repo.clone());
        let result = listing.home(home(None, PromptSort::CreatedAt)).await.unwrap();
        assert_eq!(result.pagination.total, 1);
        assert!(result.items.iter().all(|v| v.prompt.is_active));

        assert!(matches!(
            listing.prompt(hidden.prompt.id).await,
            Err(CatalogError::PromptNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_homepage_filter_is_ignored() {
        let repo = repo();
        prompt(&repo, "P1", None, vec![]).await;

        let result = PublicListingUseCase::new(repo.clone())
            .home(home(Some("nope"), PromptSort::CreatedAt))
            .await
            .unwrap();
        assert_eq!(result.pagination.total, 1);
        assert!(result.category.is_none());
    }

    #[tokio::test]
    async fn test_dedicated_pages_reject_unknown_names() {
        let listing = PublicListingUseCase::new(repo());
        assert!(matches!(
            listing.by_category("nope", page(), PromptSort::CreatedAt).await,
            Err(CatalogError::CategoryNameNotFound(_))
        ));
        assert!(matches!(
            listing.by_tag("nope", page(), PromptSort::CreatedAt).await,
            Err(CatalogError::TagNameNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_by_category_and_tag() {
        let repo = repo();
        let c1 = category(&repo, "C1").await;
        let t1 = tag(&repo, "T1").await;
        prompt(&repo, "both", Some(c1.id), vec![t1.id]).await;
        prompt(&repo, "neither", None, vec![]).await;
        let listing = PublicListingUseCase::new(repo.clone());

        let result = listing.by_category("C1", page(), PromptSort::CreatedAt).await.unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.category.map(|c| c.name), Some("C1".to_string()));

        let result = listing.by_tag("T1", page(), PromptSort::CreatedAt).await.unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].prompt.title, "both");
    }

    #[tokio::test]
    async fn test_sort_by_like_count() {
        let repo = repo();
        let quiet = prompt(&repo, "quiet", None, vec![]).await;
        let popular = prompt(&repo, "popular", None, vec![]).await;
        let engagement = EngagementUseCase::new(repo.clone());
        for n in 0..3 {
            let client = ClientIdentity::from_address(&format!("10.0.0.{n}"));
            engagement.like(popular.prompt.id, &client).await.unwrap();
        }
        engagement
            .like(quiet.prompt.id, &ClientIdentity::from_address("10.0.0.9"))
            .await
            .unwrap();

        let result = PublicListingUseCase::new(repo.clone())
            .home(home(None, PromptSort::LikeCount))
            .await
            .unwrap();
        let titles: Vec<_> = result.items.iter().map(|v| v.prompt.title.as_str()).collect();
        assert_eq!(titles, ["popular", "quiet"]);
        assert_eq!(result.sort, PromptSort::LikeCount);
    }

    #[tokio::test]
    async fn test_pagination_metadata() {
        let repo = repo();
        for n in 0..5 {
            prompt(&repo, &format!("P{n}"), None, vec![]).await;
        }

        let result = PublicListingUseCase::new(repo.clone())
            .home(ListingQuery {
                page: PageRequest::new(2, 2, 50).unwrap(),
                sort: PromptSort::CreatedAt,
                category: None,
                tag: None,
            })
            .await
            .unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.pagination.total, 5);
        assert_eq!(result.pagination.total_pages, 3);
        assert!(result.pagination.has_next);
        assert!(result.pagination.has_prev);
        assert_eq!(result.pagination.page_range, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_navigation_counts() {
        let repo = repo();
        let c1 = category(&repo, "C1").await;
        let t1 = tag(&repo, "T1").await;
        prompt(&repo, "P1", Some(c1.id), vec![t1.id]).await;
        category(&repo, "Empty").await;

        let listing = PublicListingUseCase::new(repo.clone());
        let categories = listing.categories().await.unwrap();
        let counts: Vec<_> = categories
            .iter()
            .map(|v| (v.category.name.as_str(), v.prompt_count))
            .collect();
        assert_eq!(counts, [("C1", Some(1)), ("Empty", Some(0))]);

        let tags = listing.tags().await.unwrap();
        assert_eq!(tags[0].usage_count, Some(1));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::body::to_bytes;
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            CatalogError::Validation("bad".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            CatalogError::DuplicateTagName("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::CategoryInUse { prompts: 2 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::DanglingReference.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::TagNameNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_rate_limit_response() {
        let response = CatalogError::RateLimitExceeded {
            retry_after_secs: 42,
            window_minutes: 5,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 429);
        assert_eq!(json["action"], "Retry in 5 minutes");
    }

    #[tokio::test]
    async fn test_database_details_stay_private() {
        let response = CatalogError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Database error");
    }
}

#[cfg(test)]
mod router_tests {
    use crate::application::config::CatalogConfig;
    use crate::infra::memory::MemoryCatalogRepository;
    use crate::presentation::router::{admin_router_generic, public_router_generic};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use platform::rate_limit::InMemoryRateLimitStore;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        admin: Router,
        public: Router,
    }

    fn app() -> TestApp {
        let repo = MemoryCatalogRepository::new();
        let limiter = Arc::new(InMemoryRateLimitStore::new());
        TestApp {
            admin: admin_router_generic(repo.clone(), CatalogConfig::default()),
            public: public_router_generic(repo, limiter, CatalogConfig::default()),
        }
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.7");
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(router: &Router, req: Request<Body>) -> Response {
        router.clone().oneshot(req).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create(router: &Router, uri: &str, body: Value) -> Value {
        let response = send(router, request("POST", uri, Some(body))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let app = app();
        let c1 = create(&app.admin, "/admin/categories", json!({"name": "C1"})).await;
        assert_eq!(c1["prompt_count"], 0);
        let t1 = create(&app.admin, "/admin/tags", json!({"name": "T1"})).await;
        assert_eq!(t1["color"], "#3b82f6");

        let p1 = create(
            &app.admin,
            "/admin/prompts",
            json!({
                "title": "P1",
                "content": "hello",
                "category_id": c1["id"],
                "tag_ids": [t1["id"]],
            }),
        )
        .await;

        let uri = format!("/admin/prompts/{}", p1["id"].as_str().unwrap());
        let fetched = body_json(send(&app.admin, request("GET", &uri, None)).await).await;
        assert_eq!(fetched["content"], "hello");
        assert_eq!(fetched["category"]["name"], "C1");
        assert_eq!(fetched["tags"][0]["name"], "T1");
        assert_eq!(fetched["tags"].as_array().unwrap().len(), 1);

        let uri = format!("/admin/categories/{}", c1["id"].as_str().unwrap());
        let category = body_json(send(&app.admin, request("GET", &uri, None)).await).await;
        assert_eq!(category["prompt_count"], 1);

        let public = send(&app.public, request("GET", "/api/categories/C1/prompts", None)).await;
        assert_eq!(public.status(), StatusCode::OK);
        let public = body_json(public).await;
        assert_eq!(public["pagination"]["total"], 1);
        assert_eq!(public["category"]["name"], "C1");
    }

    #[tokio::test]
    async fn test_admin_validation_and_conflicts() {
        let app = app();
        create(&app.admin, "/admin/categories", json!({"name": "C1"})).await;

        let duplicate = send(
            &app.admin,
            request("POST", "/admin/categories", Some(json!({"name": "C1"}))),
        )
        .await;
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

        let too_long = send(
            &app.admin,
            request("POST", "/admin/tags", Some(json!({"name": "x".repeat(31)}))),
        )
        .await;
        assert_eq!(too_long.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let malformed = send(
            &app.admin,
            request("POST", "/admin/prompts", Some(json!({"title": "no content"}))),
        )
        .await;
        assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing_category = send(
            &app.admin,
            request(
                "POST",
                "/admin/prompts",
                Some(json!({
                    "title": "P1",
                    "content": "hello",
                    "category_id": "00000000-0000-4000-8000-000000000000",
                })),
            ),
        )
        .await;
        assert_eq!(missing_category.status(), StatusCode::BAD_REQUEST);

        let bad_id = send(&app.admin, request("GET", "/admin/prompts/not-a-uuid", None)).await;
        assert_eq!(bad_id.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bad_page = send(&app.admin, request("GET", "/admin/prompts?per_page=101", None)).await;
        assert_eq!(bad_page.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_admin_delete_with_force() {
        let app = app();
        let c1 = create(&app.admin, "/admin/categories", json!({"name": "C1"})).await;
        create(
            &app.admin,
            "/admin/prompts",
            json!({"title": "P1", "content": "hello", "category_id": c1["id"]}),
        )
        .await;

        let uri = format!("/admin/categories/{}", c1["id"].as_str().unwrap());
        let blocked = send(&app.admin, request("DELETE", &uri, None)).await;
        assert_eq!(blocked.status(), StatusCode::BAD_REQUEST);

        let forced = send(&app.admin, request("DELETE", &format!("{uri}?force=true"), None)).await;
        assert_eq!(forced.status(), StatusCode::OK);
        assert_eq!(body_json(forced).await["success"], true);

        let list = body_json(send(&app.admin, request("GET", "/admin/prompts", None)).await).await;
        assert_eq!(list["total"], 0);
        assert_eq!(list["has_next"], false);
    }

    #[tokio::test]
    async fn test_admin_partial_update() {
        let app = app();
        let a = create(&app.admin, "/admin/tags", json!({"name": "a"})).await;
        let p1 = create(
            &app.admin,
            "/admin/prompts",
            json!({"title": "P1", "content": "hello", "description": "d", "tag_ids": [a["id"]]}),
        )
        .await;
        let uri = format!("/admin/prompts/{}", p1["id"].as_str().unwrap());

        let updated = send(
            &app.admin,
            request("PUT", &uri, Some(json!({"content": "bye", "description": null}))),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = body_json(updated).await;
        assert_eq!(updated["title"], "P1");
        assert_eq!(updated["content"], "bye");
        assert_eq!(updated["description"], Value::Null);
        assert_eq!(updated["tags"][0]["name"], "a");

        let cleared = body_json(
            send(&app.admin, request("PUT", &uri, Some(json!({"tag_ids": []})))).await,
        )
        .await;
        assert_eq!(cleared["tags"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_public_listing_params() {
        let app = app();
        create(&app.admin, "/admin/prompts", json!({"title": "P1", "content": "hello"})).await;

        let listing = send(&app.public, request("GET", "/api/prompts?sort=bogus&category=nope", None)).await;
        assert_eq!(listing.status(), StatusCode::OK);
        let listing = body_json(listing).await;
        assert_eq!(listing["sort"], "created_at");
        assert_eq!(listing["pagination"]["total"], 1);
        assert_eq!(listing["category"], Value::Null);

        let too_many = send(&app.public, request("GET", "/api/prompts?per_page=51", None)).await;
        assert_eq!(too_many.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let page_zero = send(&app.public, request("GET", "/api/prompts?page=0", None)).await;
        assert_eq!(page_zero.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let unknown = send(&app.public, request("GET", "/api/tags/nope/prompts", None)).await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_like_is_deduplicated_and_rate_limited() {
        let app = app();
        let p1 = create(&app.admin, "/admin/prompts", json!({"title": "P1", "content": "hello"})).await;
        let uri = format!("/api/prompts/{}/like", p1["id"].as_str().unwrap());

        let first = send(&app.public, request("POST", &uri, None)).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers().get("x-ratelimit-remaining").unwrap(), "4");
        let first = body_json(first).await;
        assert_eq!(first["liked"], true);
        assert_eq!(first["like_count"], 1);

        for _ in 0..4 {
            let repeat = send(&app.public, request("POST", &uri, None)).await;
            assert_eq!(repeat.status(), StatusCode::OK);
            let repeat = body_json(repeat).await;
            assert_eq!(repeat["liked"], false);
            assert_eq!(repeat["like_count"], 1);
        }

        let limited = send(&app.public, request("POST", &uri, None)).await;
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(limited.headers().contains_key(header::RETRY_AFTER));

        // A different client has its own quota
        let other = Request::builder()
            .method("POST")
            .uri(&uri)
            .header("x-forwarded-for", "198.51.100.1")
            .body(Body::empty())
            .unwrap();
        let other = send(&app.public, other).await;
        assert_eq!(other.status(), StatusCode::OK);
        assert_eq!(body_json(other).await["like_count"], 2);
    }

    #[tokio::test]
    async fn test_copy_is_not_rate_limited() {
        let app = app();
        let p1 = create(&app.admin, "/admin/prompts", json!({"title": "P1", "content": "hello"})).await;
        let uri = format!("/api/prompts/{}/copy", p1["id"].as_str().unwrap());

        for expected in 1..=7 {
            let response = send(&app.public, request("POST", &uri, None)).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["copy_count"], expected);
        }
    }

    #[tokio::test]
    async fn test_like_unknown_prompt() {
        let app = app();
        let response = send(
            &app.public,
            request("POST", "/api/prompts/00000000-0000-4000-8000-000000000000/like", None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

/// Runs only when `DATABASE_URL` points at a PostgreSQL instance.
///
/// Each test seeds the same rows into PostgreSQL and the in-memory store under
/// fresh names, then checks that both return the same ids in the same order.
#[cfg(test)]
mod postgres_tests {
    use crate::domain::entities::{Category, LikeOutcome, Prompt, Tag};
    use crate::domain::repository::{
        CatalogRepository, CategoryRepository, PromptQuery, PromptRepository, TagRepository,
    };
    use crate::domain::value_objects::PromptSort;
    use crate::infra::memory::MemoryCatalogRepository;
    use crate::infra::postgres::PgCatalogRepository;
    use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
    use kernel::id::{CategoryId, Id, PromptId, TagId};
    use sqlx::postgres::PgPoolOptions;

    async fn pg_repo() -> Option<PgCatalogRepository> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        };
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .unwrap();
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .unwrap();
        Some(PgCatalogRepository::new(pool))
    }

    struct Seed {
        category: Category,
        tag: Tag,
        prompts: Vec<(Prompt, Vec<TagId>)>,
    }

    impl Seed {
        fn id(&self, index: usize) -> PromptId {
            self.prompts[index].0.id
        }
    }

    fn prompt(
        title: &str,
        category_id: CategoryId,
        likes: i64,
        copies: i64,
        created_at: DateTime<Utc>,
    ) -> Prompt {
        Prompt {
            id: Id::new(),
            title: title.to_string(),
            content_markdown: format!("{title} body"),
            description: None,
            category_id: Some(category_id),
            is_featured: false,
            is_active: true,
            like_count: likes,
            copy_count: copies,
            created_at,
            updated_at: created_at,
        }
    }

    /// Ages sit mid-day so whole-day truncation is stable between the two clocks.
    fn seed() -> Seed {
        // timestamptz keeps microseconds
        let now = Utc::now().trunc_subsecs(6);
        let days = |d: i64| now - TimeDelta::days(d) - TimeDelta::hours(12);
        let suffix = uuid::Uuid::new_v4().simple().to_string();

        let category = Category {
            id: Id::new(),
            name: format!("pg-category-{suffix}"),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let tag = Tag {
            id: Id::new(),
            name: format!("pg-tag-{suffix}"),
            color: "#3b82f6".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        // hot: fresh 30, liked 5*3+20=35, copied 6*2+0=12, mixed 2*3+1*2+27=35
        let mut fresh = prompt("fresh", category.id, 0, 0, days(0));
        fresh.is_featured = true;
        let liked = prompt("liked", category.id, 5, 0, days(10));
        let copied = prompt("copied", category.id, 0, 6, days(40));
        let mixed = prompt("mixed", category.id, 2, 1, days(3));
        let mut hidden = prompt("hidden", category.id, 9, 9, days(1));
        hidden.is_active = false;

        Seed {
            prompts: vec![
                (fresh, vec![]),
                (liked, vec![tag.id]),
                (copied, vec![tag.id]),
                (mixed, vec![]),
                (hidden, vec![tag.id]),
            ],
            category,
            tag,
        }
    }

    async fn load<R: CatalogRepository>(repo: &R, seed: &Seed) {
        repo.insert_category(&seed.category).await.unwrap();
        repo.insert_tag(&seed.tag).await.unwrap();
        for (prompt, tag_ids) in &seed.prompts {
            repo.insert_prompt(prompt, tag_ids).await.unwrap();
        }
    }

    async fn cleanup(repo: &PgCatalogRepository, seed: &Seed) {
        repo.delete_tag(seed.tag.id).await.unwrap();
        repo.delete_category(seed.category.id).await.unwrap();
    }

    async fn ids<R: CatalogRepository>(repo: &R, query: PromptQuery) -> (Vec<PromptId>, i64) {
        let (items, total) = repo.list_prompts(&query).await.unwrap();
        (items.into_iter().map(|p| p.id).collect(), total)
    }

    fn in_category(seed: &Seed, sort: PromptSort) -> PromptQuery {
        PromptQuery {
            category_id: Some(seed.category.id),
            is_active: Some(true),
            sort,
            limit: 50,
            ..PromptQuery::default()
        }
    }

    #[tokio::test]
    async fn test_sort_orders_match_memory_store() {
        let Some(pg) = pg_repo().await else { return };
        let memory = MemoryCatalogRepository::new();
        let seed = seed();
        load(&pg, &seed).await;
        load(&memory, &seed).await;

        let (fresh, liked, copied, mixed) = (seed.id(0), seed.id(1), seed.id(2), seed.id(3));
        let expected = [
            (PromptSort::CreatedAt, vec![fresh, mixed, liked, copied]),
            (PromptSort::LikeCount, vec![liked, mixed, fresh, copied]),
            (PromptSort::CopyCount, vec![copied, mixed, fresh, liked]),
            // mixed and liked tie at 35; the newer one goes first
            (PromptSort::Hot, vec![mixed, liked, fresh, copied]),
        ];

        for (sort, order) in expected {
            let from_pg = ids(&pg, in_category(&seed, sort)).await;
            let from_memory = ids(&memory, in_category(&seed, sort)).await;
            assert_eq!(from_pg, (order.clone(), 4), "{sort:?}");
            assert_eq!(from_memory, (order, 4), "{sort:?}");
        }

        cleanup(&pg, &seed).await;
    }

    #[tokio::test]
    async fn test_null_filters_match_memory_store() {
        let Some(pg) = pg_repo().await else { return };
        let memory = MemoryCatalogRepository::new();
        let seed = seed();
        load(&pg, &seed).await;
        load(&memory, &seed).await;

        let everything = PromptQuery {
            is_active: None,
            ..in_category(&seed, PromptSort::CreatedAt)
        };
        let queries = [
            (everything, 5),
            (PromptQuery { is_active: Some(false), ..everything }, 1),
            (in_category(&seed, PromptSort::CreatedAt), 4),
            (PromptQuery { is_featured: Some(true), ..everything }, 1),
            // No category filter: the unique tag alone narrows the rows
            (
                PromptQuery {
                    category_id: None,
                    tag_id: Some(seed.tag.id),
                    ..everything
                },
                3,
            ),
            (
                PromptQuery {
                    category_id: None,
                    tag_id: Some(seed.tag.id),
                    is_active: Some(true),
                    ..everything
                },
                2,
            ),
            (PromptQuery { offset: 3, limit: 1, ..everything }, 5),
        ];

        for (query, total) in queries {
            let from_pg = ids(&pg, query).await;
            let from_memory = ids(&memory, query).await;
            assert_eq!(from_pg.1, total, "{query:?}");
            assert_eq!(from_pg, from_memory, "{query:?}");
        }

        cleanup(&pg, &seed).await;
    }

    #[tokio::test]
    async fn test_repeat_like_matches_memory_store() {
        let Some(pg) = pg_repo().await else { return };
        let memory = MemoryCatalogRepository::new();
        let seed = seed();
        load(&pg, &seed).await;
        load(&memory, &seed).await;

        let fresh = seed.id(0);
        let hidden = seed.id(4);
        let steps = [
            (fresh, "client-a", Some(LikeOutcome { liked: true, like_count: 1 })),
            (fresh, "client-a", Some(LikeOutcome { liked: false, like_count: 1 })),
            (fresh, "client-b", Some(LikeOutcome { liked: true, like_count: 2 })),
            (hidden, "client-a", None),
            (Id::new(), "client-a", None),
        ];

        for (id, client, expected) in steps {
            assert_eq!(pg.record_like(id, client).await.unwrap(), expected);
            assert_eq!(memory.record_like(id, client).await.unwrap(), expected);
        }

        let stored = pg.find_prompt(fresh).await.unwrap().unwrap();
        assert_eq!(stored.like_count, 2);

        cleanup(&pg, &seed).await;
        assert!(pg.find_prompt(fresh).await.unwrap().is_none());
    }
}
