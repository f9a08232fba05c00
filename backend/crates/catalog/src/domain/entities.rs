//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, Id, PromptId, TagId};
use kernel::patch::Patch;

use crate::domain::value_objects::{
    CategoryDescription, CategoryName, PromptContent, PromptDescription, PromptTitle, TagColor,
    TagName,
};

// ============================================================================
// Category
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
    pub is_active: bool,
}

/// Partial update; `None`/`Missing` fields are left alone
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<CategoryName>,
    pub description: Patch<CategoryDescription>,
    pub is_active: Option<bool>,
}

impl Category {
    pub fn create(input: NewCategory, now: DateTime<Utc>) -> Self {
        Self {
            id: Id::new(),
            name: input.name.into_inner(),
            description: input.description.map(CategoryDescription::into_inner),
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: CategoryChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name.into_inner();
        }
        changes
            .description
            .map(CategoryDescription::into_inner)
            .apply_to(&mut self.description);
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}

// ============================================================================
// Tag
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: TagName,
    pub color: TagColor,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TagChanges {
    pub name: Option<TagName>,
    pub color: Option<TagColor>,
    pub is_active: Option<bool>,
}

impl Tag {
    pub fn create(input: NewTag, now: DateTime<Utc>) -> Self {
        Self {
            id: Id::new(),
            name: input.name.into_inner(),
            color: input.color.into_inner(),
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: TagChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name.into_inner();
        }
        if let Some(color) = changes.color {
            self.color = color.into_inner();
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}

// ============================================================================
// Prompt
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub id: PromptId,
    pub title: String,
    pub content_markdown: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_featured: bool,
    pub is_active: bool,
    pub like_count: i64,
    pub copy_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub title: PromptTitle,
    pub content: PromptContent,
    pub description: Option<PromptDescription>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
    pub is_featured: bool,
    pub is_active: bool,
}

/// Partial update
///
/// `tag_ids: Some(..)` replaces the whole association set, even when empty.
/// `None` leaves the associations untouched.
#[derive(Debug, Clone, Default)]
pub struct PromptChanges {
    pub title: Option<PromptTitle>,
    pub content: Option<PromptContent>,
    pub description: Patch<PromptDescription>,
    pub category_id: Patch<CategoryId>,
    pub tag_ids: Option<Vec<TagId>>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

impl Prompt {
    /// Counters start at zero; tags are stored separately
    pub fn create(input: &NewPrompt, now: DateTime<Utc>) -> Self {
        Self {
            id: Id::new(),
            title: input.title.as_str().to_string(),
            content_markdown: input.content.as_str().to_string(),
            description: input
                .description
                .as_ref()
                .map(|d| d.as_str().to_string()),
            category_id: input.category_id,
            is_featured: input.is_featured,
            is_active: input.is_active,
            like_count: 0,
            copy_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply scalar field changes; `tag_ids` is handled by the repository
    pub fn apply(&mut self, changes: &PromptChanges, now: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.as_str().to_string();
        }
        if let Some(content) = &changes.content {
            self.content_markdown = content.as_str().to_string();
        }
        changes
            .description
            .as_ref()
            .map(|d| d.as_str().to_string())
            .apply_to(&mut self.description);
        changes.category_id.clone().apply_to(&mut self.category_id);
        if let Some(is_featured) = changes.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}

/// Result of recording a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    /// `false` when this client had already liked the prompt
    pub liked: bool,
    pub like_count: i64,
}

// ============================================================================
// Enriched read models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub category: Category,
    /// Active prompts in the category, when requested
    pub prompt_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub tag: Tag,
    /// Associations to active prompts, when requested
    pub usage_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub prompt: Prompt,
    pub category: Option<Category>,
    /// Ordered by name; empty when relations were not requested
    pub tags: Vec<Tag>,
}
