//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, PromptId, TagId};
use kernel::page::Pagination;
use kernel::patch::Patch;
use serde::{Deserialize, Serialize};

use crate::application::{ListPage, ListingPage};
use crate::domain::entities::{
    Category, CategoryChanges, CategoryView, NewCategory, NewPrompt, NewTag, PromptChanges,
    PromptView, Tag, TagChanges, TagView,
};
use crate::domain::value_objects::{
    CategoryDescription, CategoryName, PromptContent, PromptDescription, PromptTitle, TagColor,
    TagName,
};
use crate::error::CatalogError;

fn default_true() -> bool {
    true
}

// ============================================================================
// Requests
// ============================================================================

/// Request for POST /admin/categories
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl TryFrom<CreateCategoryRequest> for NewCategory {
    type Error = CatalogError;

    fn try_from(req: CreateCategoryRequest) -> Result<Self, Self::Error> {
        Ok(NewCategory {
            name: CategoryName::parse(req.name)?,
            description: req.description.map(CategoryDescription::parse).transpose()?,
            is_active: req.is_active,
        })
    }
}

/// Request for PUT /admin/categories/{id}
///
/// `null` on `description` clears it; `null` elsewhere is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<UpdateCategoryRequest> for CategoryChanges {
    type Error = CatalogError;

    fn try_from(req: UpdateCategoryRequest) -> Result<Self, Self::Error> {
        Ok(CategoryChanges {
            name: req.name.map(CategoryName::parse).transpose()?,
            description: parse_patch(req.description, CategoryDescription::parse)?,
            is_active: req.is_active,
        })
    }
}

/// Request for POST /admin/tags
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl TryFrom<CreateTagRequest> for NewTag {
    type Error = CatalogError;

    fn try_from(req: CreateTagRequest) -> Result<Self, Self::Error> {
        Ok(NewTag {
            name: TagName::parse(req.name)?,
            color: req
                .color
                .map(TagColor::parse)
                .transpose()?
                .unwrap_or_default(),
            is_active: req.is_active,
        })
    }
}

/// Request for PUT /admin/tags/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTagRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<UpdateTagRequest> for TagChanges {
    type Error = CatalogError;

    fn try_from(req: UpdateTagRequest) -> Result<Self, Self::Error> {
        Ok(TagChanges {
            name: req.name.map(TagName::parse).transpose()?,
            color: req.color.map(TagColor::parse).transpose()?,
            is_active: req.is_active,
        })
    }
}

/// Request for POST /admin/prompts
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromptRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl TryFrom<CreatePromptRequest> for NewPrompt {
    type Error = CatalogError;

    fn try_from(req: CreatePromptRequest) -> Result<Self, Self::Error> {
        Ok(NewPrompt {
            title: PromptTitle::parse(req.title)?,
            content: PromptContent::parse(req.content)?,
            description: req.description.map(PromptDescription::parse).transpose()?,
            category_id: req.category_id,
            tag_ids: req.tag_ids,
            is_featured: req.is_featured,
            is_active: req.is_active,
        })
    }
}

/// Request for PUT /admin/prompts/{id}
///
/// A present `tag_ids` (even `[]`) replaces every association.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePromptRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub category_id: Patch<CategoryId>,
    #[serde(default)]
    pub tag_ids: Option<Vec<TagId>>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<UpdatePromptRequest> for PromptChanges {
    type Error = CatalogError;

    fn try_from(req: UpdatePromptRequest) -> Result<Self, Self::Error> {
        Ok(PromptChanges {
            title: req.title.map(PromptTitle::parse).transpose()?,
            content: req.content.map(PromptContent::parse).transpose()?,
            description: parse_patch(req.description, PromptDescription::parse)?,
            category_id: req.category_id,
            tag_ids: req.tag_ids,
            is_featured: req.is_featured,
            is_active: req.is_active,
        })
    }
}

fn parse_patch<T>(
    patch: Patch<String>,
    parse: impl FnOnce(String) -> Result<T, CatalogError>,
) -> Result<Patch<T>, CatalogError> {
    Ok(match patch {
        Patch::Missing => Patch::Missing,
        Patch::Null => Patch::Null,
        Patch::Value(v) => Patch::Value(parse(v)?),
    })
}

// ============================================================================
// Query parameters
// ============================================================================

/// GET /admin/categories and /admin/tags
#[derive(Debug, Clone, Deserialize)]
pub struct AdminListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(default)]
    pub active_only: bool,
    #[serde(default = "default_true")]
    pub include_count: bool,
}

/// GET /admin/categories/{id} and /admin/tags/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct CountParams {
    #[serde(default = "default_true")]
    pub include_count: bool,
}

/// GET /admin/prompts
#[derive(Debug, Clone, Deserialize)]
pub struct PromptListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_id: Option<CategoryId>,
    pub tag_id: Option<TagId>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    #[serde(default = "default_true")]
    pub include_relations: bool,
}

/// GET /admin/prompts/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct RelationParams {
    #[serde(default = "default_true")]
    pub include_relations: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub force: bool,
}

/// Public listing query; an unknown `sort` falls back to newest first
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_count: Option<i64>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            is_active: category.is_active,
            created_at: category.created_at,
            updated_at: category.updated_at,
            prompt_count: None,
        }
    }
}

impl From<CategoryView> for CategoryResponse {
    fn from(view: CategoryView) -> Self {
        Self {
            prompt_count: view.prompt_count,
            ..view.category.into()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<i64>,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            is_active: tag.is_active,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
            usage_count: None,
        }
    }
}

impl From<TagView> for TagResponse {
    fn from(view: TagView) -> Self {
        Self {
            usage_count: view.usage_count,
            ..view.tag.into()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptResponse {
    pub id: PromptId,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
    pub is_featured: bool,
    pub is_active: bool,
    pub like_count: i64,
    pub copy_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<TagResponse>,
}

impl From<PromptView> for PromptResponse {
    fn from(view: PromptView) -> Self {
        let prompt = view.prompt;
        Self {
            id: prompt.id,
            title: prompt.title,
            content: prompt.content_markdown,
            description: prompt.description,
            category_id: prompt.category_id,
            tag_ids: view.tags.iter().map(|t| t.id).collect(),
            is_featured: prompt.is_featured,
            is_active: prompt.is_active,
            like_count: prompt.like_count,
            copy_count: prompt.copy_count,
            created_at: prompt.created_at,
            updated_at: prompt.updated_at,
            category: view.category.map(CategoryResponse::from),
            tags: view.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

/// Admin list envelope
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<V, T> From<ListPage<V>> for ListResponse<T>
where
    T: From<V>,
{
    fn from(page: ListPage<V>) -> Self {
        Self {
            has_next: page.has_next(),
            has_prev: page.has_prev(),
            total: page.total,
            page: page.page.page,
            per_page: page.page.per_page,
            items: page.items.into_iter().map(T::from).collect(),
        }
    }
}

/// Public listing envelope
#[derive(Debug, Clone, Serialize)]
pub struct PublicListResponse {
    pub items: Vec<PromptResponse>,
    pub pagination: Pagination,
    pub sort: &'static str,
    pub category: Option<CategoryResponse>,
    pub tag: Option<TagResponse>,
}

impl From<ListingPage> for PublicListResponse {
    fn from(listing: ListingPage) -> Self {
        Self {
            items: listing.items.into_iter().map(PromptResponse::from).collect(),
            pagination: listing.pagination,
            sort: listing.sort.as_str(),
            category: listing.category.map(CategoryResponse::from),
            tag: listing.tag.map(TagResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }
}

/// Response for POST /api/prompts/{id}/like
#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

/// Response for POST /api/prompts/{id}/copy
#[derive(Debug, Clone, Serialize)]
pub struct CopyResponse {
    pub copy_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_prompt_distinguishes_missing_from_empty_tags() {
        let untouched: UpdatePromptRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(untouched.tag_ids.is_none());

        let cleared: UpdatePromptRequest = serde_json::from_str(r#"{"tag_ids":[]}"#).unwrap();
        assert_eq!(cleared.tag_ids, Some(vec![]));
    }

    #[test]
    fn test_update_prompt_null_category_clears() {
        let req: UpdatePromptRequest = serde_json::from_str(r#"{"category_id":null}"#).unwrap();
        let changes = PromptChanges::try_from(req).unwrap();
        assert_eq!(changes.category_id, Patch::Null);
    }

    #[test]
    fn test_create_tag_defaults_color() {
        let req: CreateTagRequest = serde_json::from_str(r#"{"name":"rust"}"#).unwrap();
        let tag = NewTag::try_from(req).unwrap();
        assert_eq!(tag.color.as_str(), TagColor::DEFAULT);
        assert!(tag.is_active);
    }

    #[test]
    fn test_create_category_rejects_long_name() {
        let req = CreateCategoryRequest {
            name: "x".repeat(51),
            description: None,
            is_active: true,
        };
        assert!(matches!(
            NewCategory::try_from(req),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_count_omitted_when_not_requested() {
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name: "Writing".into(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(CategoryResponse::from(category.clone())).unwrap();
        assert!(json.get("prompt_count").is_none());

        let view = CategoryView {
            category,
            prompt_count: Some(0),
        };
        let json = serde_json::to_value(CategoryResponse::from(view)).unwrap();
        assert_eq!(json["prompt_count"], 0);
    }
}
