//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, Id, PromptId, TagId};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::entities::{Category, LikeOutcome, Prompt, Tag};
use crate::domain::repository::{
    CategoryRepository, ListQuery, PromptQuery, PromptRepository, TagRepository,
};
use crate::domain::services::{HOT_COPY_WEIGHT, HOT_LIKE_WEIGHT, HOT_RECENCY_DAYS};
use crate::domain::value_objects::PromptSort;
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

/// Row counts reported by the database health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub categories: i64,
    pub tags: i64,
    pub prompts: i64,
    pub prompt_tags: i64,
    pub prompt_likes: i64,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Live `COUNT(*)` of every catalog table
    pub async fn health(&self) -> CatalogResult<TableCounts> {
        let (categories, tags, prompts, prompt_tags, prompt_likes) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM categories),
                    (SELECT COUNT(*) FROM tags),
                    (SELECT COUNT(*) FROM prompts),
                    (SELECT COUNT(*) FROM prompt_tags),
                    (SELECT COUNT(*) FROM prompt_likes)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(TableCounts {
            categories,
            tags,
            prompts,
            prompt_tags,
            prompt_likes,
        })
    }
}

fn uuids<T>(ids: &[Id<T>]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_uuid()).collect()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

fn category_write_error(err: sqlx::Error, name: &str) -> CatalogError {
    if is_unique_violation(&err) {
        CatalogError::DuplicateCategoryName(name.to_string())
    } else {
        CatalogError::Database(err)
    }
}

fn tag_write_error(err: sqlx::Error, name: &str) -> CatalogError {
    if is_unique_violation(&err) {
        CatalogError::DuplicateTagName(name.to_string())
    } else {
        CatalogError::Database(err)
    }
}

fn prompt_write_error(err: sqlx::Error) -> CatalogError {
    if is_foreign_key_violation(&err) {
        CatalogError::DanglingReference
    } else {
        CatalogError::Database(err)
    }
}

// ============================================================================
// Categories
// ============================================================================

impl CategoryRepository for PgCatalogRepository {
    async fn insert_category(&self, category: &Category) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (
                category_id,
                name,
                description,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id.into_uuid())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| category_write_error(e, &category.name))?;

        Ok(())
    }

    async fn find_category(&self, id: CategoryId) -> CatalogResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, name, description, is_active, created_at, updated_at
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn find_category_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, name, description, is_active, created_at, updated_at
            FROM categories
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn find_categories(&self, ids: &[CategoryId]) -> CatalogResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, name, description, is_active, created_at, updated_at
            FROM categories
            WHERE category_id = ANY($1)
            "#,
        )
        .bind(uuids(ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn list_categories(&self, query: &ListQuery) -> CatalogResult<(Vec<Category>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories WHERE ($1::boolean = FALSE OR is_active)",
        )
        .bind(query.active_only)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, name, description, is_active, created_at, updated_at
            FROM categories
            WHERE ($1::boolean = FALSE OR is_active)
            ORDER BY name, category_id
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(query.active_only)
        .bind(query.offset)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(CategoryRow::into_category).collect(), total))
    }

    async fn update_category(&self, category: &Category) -> CatalogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, description = $3, is_active = $4, updated_at = $5
            WHERE category_id = $1
            "#,
        )
        .bind(category.id.into_uuid())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.is_active)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| category_write_error(e, &category.name))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, id: CategoryId) -> CatalogResult<bool> {
        // prompts, prompt_tags and prompt_likes follow through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_category_prompts(
        &self,
        ids: &[CategoryId],
        active_only: bool,
    ) -> CatalogResult<HashMap<CategoryId, i64>> {
        let mut counts: HashMap<CategoryId, i64> = ids.iter().map(|id| (*id, 0)).collect();
        if ids.is_empty() {
            return Ok(counts);
        }

        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT category_id, COUNT(*)
            FROM prompts
            WHERE category_id = ANY($1) AND ($2::boolean = FALSE OR is_active)
            GROUP BY category_id
            "#,
        )
        .bind(uuids(ids))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        counts.extend(rows.into_iter().map(|(id, n)| (Id::from_uuid(id), n)));
        Ok(counts)
    }
}

// ============================================================================
// Tags
// ============================================================================

impl TagRepository for PgCatalogRepository {
    async fn insert_tag(&self, tag: &Tag) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tags (
                tag_id,
                name,
                color,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(tag.id.into_uuid())
        .bind(&tag.name)
        .bind(&tag.color)
        .bind(tag.is_active)
        .bind(tag.created_at)
        .bind(tag.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| tag_write_error(e, &tag.name))?;

        Ok(())
    }

    async fn find_tag(&self, id: TagId) -> CatalogResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT tag_id, name, color, is_active, created_at, updated_at
            FROM tags
            WHERE tag_id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TagRow::into_tag))
    }

    async fn find_tag_by_name(&self, name: &str) -> CatalogResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT tag_id, name, color, is_active, created_at, updated_at
            FROM tags
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TagRow::into_tag))
    }

    async fn find_tags(&self, ids: &[TagId]) -> CatalogResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT tag_id, name, color, is_active, created_at, updated_at
            FROM tags
            WHERE tag_id = ANY($1)
            "#,
        )
        .bind(uuids(ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn list_tags(&self, query: &ListQuery) -> CatalogResult<(Vec<Tag>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tags WHERE ($1::boolean = FALSE OR is_active)",
        )
        .bind(query.active_only)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT tag_id, name, color, is_active, created_at, updated_at
            FROM tags
            WHERE ($1::boolean = FALSE OR is_active)
            ORDER BY name, tag_id
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(query.active_only)
        .bind(query.offset)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(TagRow::into_tag).collect(), total))
    }

    async fn update_tag(&self, tag: &Tag) -> CatalogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tags
            SET name = $2, color = $3, is_active = $4, updated_at = $5
            WHERE tag_id = $1
            "#,
        )
        .bind(tag.id.into_uuid())
        .bind(&tag.name)
        .bind(&tag.color)
        .bind(tag.is_active)
        .bind(tag.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| tag_write_error(e, &tag.name))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_tag(&self, id: TagId) -> CatalogResult<bool> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("DELETE FROM prompt_tags WHERE tag_id = $1")
            .bind(id.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM tags WHERE tag_id = $1")
            .bind(id.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(tag_id = %id, detached, "Tag associations removed");

        Ok(deleted > 0)
    }

    async fn count_tag_usage(
        &self,
        ids: &[TagId],
        active_only: bool,
    ) -> CatalogResult<HashMap<TagId, i64>> {
        let mut counts: HashMap<TagId, i64> = ids.iter().map(|id| (*id, 0)).collect();
        if ids.is_empty() {
            return Ok(counts);
        }

        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT pt.tag_id, COUNT(*)
            FROM prompt_tags pt
            JOIN prompts p ON p.prompt_id = pt.prompt_id
            WHERE pt.tag_id = ANY($1) AND ($2::boolean = FALSE OR p.is_active)
            GROUP BY pt.tag_id
            "#,
        )
        .bind(uuids(ids))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        counts.extend(rows.into_iter().map(|(id, n)| (Id::from_uuid(id), n)));
        Ok(counts)
    }
}

// ============================================================================
// Prompts
// ============================================================================

const PROMPT_COLUMNS: &str = r#"
    p.prompt_id,
    p.title,
    p.content_markdown,
    p.description,
    p.category_id,
    p.is_featured,
    p.is_active,
    p.like_count,
    p.copy_count,
    p.created_at,
    p.updated_at
"#;

/// `$1` category, `$2` tag, `$3` featured, `$4` active; NULL disables a filter
const PROMPT_FILTER: &str = r#"
    WHERE ($1::uuid IS NULL OR p.category_id = $1)
      AND ($2::uuid IS NULL OR EXISTS (
            SELECT 1 FROM prompt_tags pt
            WHERE pt.prompt_id = p.prompt_id AND pt.tag_id = $2
      ))
      AND ($3::boolean IS NULL OR p.is_featured = $3)
      AND ($4::boolean IS NULL OR p.is_active = $4)
"#;

/// ORDER BY matching `services::compare_prompts`
fn prompt_order(sort: PromptSort) -> String {
    let primary = match sort {
        PromptSort::CreatedAt => String::new(),
        PromptSort::LikeCount => "p.like_count DESC, ".to_string(),
        PromptSort::CopyCount => "p.copy_count DESC, ".to_string(),
        PromptSort::Hot => format!(
            "(p.like_count * {} + p.copy_count * {} + GREATEST(0, {} - GREATEST(0, \
             FLOOR(EXTRACT(EPOCH FROM (NOW() - p.created_at)) / 86400)::BIGINT))) DESC, ",
            HOT_LIKE_WEIGHT, HOT_COPY_WEIGHT, HOT_RECENCY_DAYS
        ),
    };
    format!("{}p.created_at DESC, p.prompt_id", primary)
}

async fn insert_prompt_tags(
    conn: &mut sqlx::PgConnection,
    prompt_id: PromptId,
    tag_ids: &[TagId],
) -> CatalogResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO prompt_tags (prompt_id, tag_id)
        SELECT $1, UNNEST($2::uuid[])
        "#,
    )
    .bind(prompt_id.into_uuid())
    .bind(uuids(tag_ids))
    .execute(conn)
    .await
    .map_err(prompt_write_error)?;

    Ok(())
}

impl PromptRepository for PgCatalogRepository {
    async fn insert_prompt(&self, prompt: &Prompt, tag_ids: &[TagId]) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO prompts (
                prompt_id,
                title,
                content_markdown,
                description,
                category_id,
                is_featured,
                is_active,
                like_count,
                copy_count,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(prompt.id.into_uuid())
        .bind(&prompt.title)
        .bind(&prompt.content_markdown)
        .bind(&prompt.description)
        .bind(prompt.category_id.map(Id::into_uuid))
        .bind(prompt.is_featured)
        .bind(prompt.is_active)
        .bind(prompt.like_count)
        .bind(prompt.copy_count)
        .bind(prompt.created_at)
        .bind(prompt.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(prompt_write_error)?;

        insert_prompt_tags(&mut *tx, prompt.id, tag_ids).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_prompt(&self, id: PromptId) -> CatalogResult<Option<Prompt>> {
        let sql = format!("SELECT {} FROM prompts p WHERE p.prompt_id = $1", PROMPT_COLUMNS);
        let row = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PromptRow::into_prompt))
    }

    async fn list_prompts(&self, query: &PromptQuery) -> CatalogResult<(Vec<Prompt>, i64)> {
        let category_id = query.category_id.map(Id::into_uuid);
        let tag_id = query.tag_id.map(Id::into_uuid);

        let count_sql = format!("SELECT COUNT(*) FROM prompts p {}", PROMPT_FILTER);
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(category_id)
            .bind(tag_id)
            .bind(query.is_featured)
            .bind(query.is_active)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT {} FROM prompts p {} ORDER BY {} OFFSET $5 LIMIT $6",
            PROMPT_COLUMNS,
            PROMPT_FILTER,
            prompt_order(query.sort)
        );
        let rows = sqlx::query_as::<_, PromptRow>(&list_sql)
            .bind(category_id)
            .bind(tag_id)
            .bind(query.is_featured)
            .bind(query.is_active)
            .bind(query.offset)
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(PromptRow::into_prompt).collect(), total))
    }

    async fn update_prompt(&self, prompt: &Prompt, tag_ids: Option<&[TagId]>) -> CatalogResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE prompts
            SET title = $2,
                content_markdown = $3,
                description = $4,
                category_id = $5,
                is_featured = $6,
                is_active = $7,
                updated_at = $8
            WHERE prompt_id = $1
            "#,
        )
        .bind(prompt.id.into_uuid())
        .bind(&prompt.title)
        .bind(&prompt.content_markdown)
        .bind(&prompt.description)
        .bind(prompt.category_id.map(Id::into_uuid))
        .bind(prompt.is_featured)
        .bind(prompt.is_active)
        .bind(prompt.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(prompt_write_error)?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(tag_ids) = tag_ids {
            sqlx::query("DELETE FROM prompt_tags WHERE prompt_id = $1")
                .bind(prompt.id.into_uuid())
                .execute(&mut *tx)
                .await?;
            insert_prompt_tags(&mut *tx, prompt.id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_prompt(&self, id: PromptId) -> CatalogResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM prompt_tags WHERE prompt_id = $1")
            .bind(id.into_uuid())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM prompt_likes WHERE prompt_id = $1")
            .bind(id.into_uuid())
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM prompts WHERE prompt_id = $1")
            .bind(id.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn prompt_tags(&self, ids: &[PromptId]) -> CatalogResult<HashMap<PromptId, Vec<Tag>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PromptTagRow>(
            r#"
            SELECT pt.prompt_id, t.tag_id, t.name, t.color, t.is_active, t.created_at, t.updated_at
            FROM prompt_tags pt
            JOIN tags t ON t.tag_id = pt.tag_id
            WHERE pt.prompt_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(uuids(ids))
        .fetch_all(&self.pool)
        .await?;

        let mut result: HashMap<PromptId, Vec<Tag>> = HashMap::new();
        for row in rows {
            let (prompt_id, tag) = row.into_pair();
            result.entry(prompt_id).or_default().push(tag);
        }
        Ok(result)
    }

    async fn record_like(&self, id: PromptId, client_key: &str) -> CatalogResult<Option<LikeOutcome>> {
        let mut tx = self.pool.begin().await?;

        // Row lock serialises concurrent likes on one prompt
        let active = sqlx::query_scalar::<_, bool>(
            "SELECT is_active FROM prompts WHERE prompt_id = $1 FOR UPDATE",
        )
        .bind(id.into_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        if active != Some(true) {
            tx.rollback().await?;
            return Ok(None);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO prompt_likes (prompt_id, client_hash)
            VALUES ($1, $2)
            ON CONFLICT (prompt_id, client_hash) DO NOTHING
            "#,
        )
        .bind(id.into_uuid())
        .bind(client_key)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        let like_count = sqlx::query_scalar::<_, i64>(
            "UPDATE prompts SET like_count = like_count + $2 WHERE prompt_id = $1 RETURNING like_count",
        )
        .bind(id.into_uuid())
        .bind(i64::from(inserted))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(LikeOutcome {
            liked: inserted,
            like_count,
        }))
    }

    async fn record_copy(&self, id: PromptId) -> CatalogResult<Option<i64>> {
        let copy_count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE prompts
            SET copy_count = copy_count + 1
            WHERE prompt_id = $1 AND is_active
            RETURNING copy_count
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(copy_count)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: Id::from_uuid(self.category_id),
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    tag_id: Uuid,
    name: String,
    color: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            id: Id::from_uuid(self.tag_id),
            name: self.name,
            color: self.color,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PromptTagRow {
    prompt_id: Uuid,
    #[sqlx(flatten)]
    tag: TagRow,
}

impl PromptTagRow {
    fn into_pair(self) -> (PromptId, Tag) {
        (Id::from_uuid(self.prompt_id), self.tag.into_tag())
    }
}

#[derive(sqlx::FromRow)]
struct PromptRow {
    prompt_id: Uuid,
    title: String,
    content_markdown: String,
    description: Option<String>,
    category_id: Option<Uuid>,
    is_featured: bool,
    is_active: bool,
    like_count: i64,
    copy_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PromptRow {
    fn into_prompt(self) -> Prompt {
        Prompt {
            id: Id::from_uuid(self.prompt_id),
            title: self.title,
            content_markdown: self.content_markdown,
            description: self.description,
            category_id: self.category_id.map(Id::from_uuid),
            is_featured: self.is_featured,
            is_active: self.is_active,
            like_count: self.like_count,
            copy_count: self.copy_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
