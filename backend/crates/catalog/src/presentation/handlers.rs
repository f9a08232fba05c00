//! Admin HTTP Handlers
//!
//! Bad query strings, bodies and path ids are turned into 422 responses
//! through `CatalogError` rather than axum's plain-text rejections.

use crate::application::config::CatalogConfig;
use crate::application::{CategoryUseCases, PromptFilter, PromptUseCases, TagUseCases};
use crate::domain::repository::CatalogRepository;
use crate::error::CatalogResult;
use crate::presentation::dto::{
    AdminListParams, CategoryResponse, CountParams, CreateCategoryRequest, CreatePromptRequest,
    CreateTagRequest, DeleteParams, ListResponse, MessageResponse, PromptListParams,
    PromptResponse, RelationParams, TagResponse, UpdateCategoryRequest, UpdatePromptRequest,
    UpdateTagRequest,
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{CategoryId, PromptId, TagId};
use std::sync::Arc;

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CatalogRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<CatalogConfig>,
}

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type QueryParams<T> = Result<Query<T>, QueryRejection>;
type PathId<T> = Result<Path<T>, PathRejection>;

// ============================================================================
// Categories
// ============================================================================

/// POST /admin/categories
pub async fn create_category<R>(
    State(state): State<CatalogAppState<R>>,
    body: JsonBody<CreateCategoryRequest>,
) -> CatalogResult<(StatusCode, Json<CategoryResponse>)>
where
    R: CatalogRepository,
{
    let Json(req) = body?;
    let view = CategoryUseCases::new(state.repo.clone())
        .create(req.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// GET /admin/categories
pub async fn list_categories<R>(
    State(state): State<CatalogAppState<R>>,
    params: QueryParams<AdminListParams>,
) -> CatalogResult<Json<ListResponse<CategoryResponse>>>
where
    R: CatalogRepository,
{
    let Query(params) = params?;
    let page = state.config.admin_page(params.page, params.per_page)?;
    let result = CategoryUseCases::new(state.repo.clone())
        .list(page, params.active_only, params.include_count)
        .await?;

    Ok(Json(result.into()))
}

/// GET /admin/categories/{id}
pub async fn get_category<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<CategoryId>,
    params: QueryParams<CountParams>,
) -> CatalogResult<Json<CategoryResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Query(params) = params?;
    let view = CategoryUseCases::new(state.repo.clone())
        .get(id, params.include_count)
        .await?;

    Ok(Json(view.into()))
}

/// PUT /admin/categories/{id}
pub async fn update_category<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<CategoryId>,
    body: JsonBody<UpdateCategoryRequest>,
) -> CatalogResult<Json<CategoryResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Json(req) = body?;
    let view = CategoryUseCases::new(state.repo.clone())
        .update(id, req.try_into()?)
        .await?;

    Ok(Json(view.into()))
}

/// DELETE /admin/categories/{id}?force=
pub async fn delete_category<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<CategoryId>,
    params: QueryParams<DeleteParams>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Query(params) = params?;
    CategoryUseCases::new(state.repo.clone())
        .delete(id, params.force)
        .await?;

    Ok(Json(MessageResponse::ok("Category deleted")))
}

// ============================================================================
// Tags
// ============================================================================

/// POST /admin/tags
pub async fn create_tag<R>(
    State(state): State<CatalogAppState<R>>,
    body: JsonBody<CreateTagRequest>,
) -> CatalogResult<(StatusCode, Json<TagResponse>)>
where
    R: CatalogRepository,
{
    let Json(req) = body?;
    let view = TagUseCases::new(state.repo.clone())
        .create(req.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// GET /admin/tags
pub async fn list_tags<R>(
    State(state): State<CatalogAppState<R>>,
    params: QueryParams<AdminListParams>,
) -> CatalogResult<Json<ListResponse<TagResponse>>>
where
    R: CatalogRepository,
{
    let Query(params) = params?;
    let page = state.config.admin_page(params.page, params.per_page)?;
    let result = TagUseCases::new(state.repo.clone())
        .list(page, params.active_only, params.include_count)
        .await?;

    Ok(Json(result.into()))
}

/// GET /admin/tags/{id}
pub async fn get_tag<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<TagId>,
    params: QueryParams<CountParams>,
) -> CatalogResult<Json<TagResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Query(params) = params?;
    let view = TagUseCases::new(state.repo.clone())
        .get(id, params.include_count)
        .await?;

    Ok(Json(view.into()))
}

/// PUT /admin/tags/{id}
pub async fn update_tag<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<TagId>,
    body: JsonBody<UpdateTagRequest>,
) -> CatalogResult<Json<TagResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Json(req) = body?;
    let view = TagUseCases::new(state.repo.clone())
        .update(id, req.try_into()?)
        .await?;

    Ok(Json(view.into()))
}

/// DELETE /admin/tags/{id}?force=
pub async fn delete_tag<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<TagId>,
    params: QueryParams<DeleteParams>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Query(params) = params?;
    TagUseCases::new(state.repo.clone())
        .delete(id, params.force)
        .await?;

    Ok(Json(MessageResponse::ok("Tag deleted")))
}

// ============================================================================
// Prompts
// ============================================================================

/// POST /admin/prompts
pub async fn create_prompt<R>(
    State(state): State<CatalogAppState<R>>,
    body: JsonBody<CreatePromptRequest>,
) -> CatalogResult<(StatusCode, Json<PromptResponse>)>
where
    R: CatalogRepository,
{
    let Json(req) = body?;
    let view = PromptUseCases::new(state.repo.clone())
        .create(req.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// GET /admin/prompts
pub async fn list_prompts<R>(
    State(state): State<CatalogAppState<R>>,
    params: QueryParams<PromptListParams>,
) -> CatalogResult<Json<ListResponse<PromptResponse>>>
where
    R: CatalogRepository,
{
    let Query(params) = params?;
    let page = state.config.admin_page(params.page, params.per_page)?;
    let filter = PromptFilter {
        category_id: params.category_id,
        tag_id: params.tag_id,
        is_featured: params.is_featured,
        is_active: params.is_active,
    };
    let result = PromptUseCases::new(state.repo.clone())
        .list(filter, page, params.include_relations)
        .await?;

    Ok(Json(result.into()))
}

/// GET /admin/prompts/{id}
pub async fn get_prompt<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<PromptId>,
    params: QueryParams<RelationParams>,
) -> CatalogResult<Json<PromptResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Query(params) = params?;
    let view = PromptUseCases::new(state.repo.clone())
        .get(id, params.include_relations)
        .await?;

    Ok(Json(view.into()))
}

/// PUT /admin/prompts/{id}
pub async fn update_prompt<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<PromptId>,
    body: JsonBody<UpdatePromptRequest>,
) -> CatalogResult<Json<PromptResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let Json(req) = body?;
    let view = PromptUseCases::new(state.repo.clone())
        .update(id, req.try_into()?)
        .await?;

    Ok(Json(view.into()))
}

/// DELETE /admin/prompts/{id}
pub async fn delete_prompt<R>(
    State(state): State<CatalogAppState<R>>,
    id: PathId<PromptId>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    PromptUseCases::new(state.repo.clone()).delete(id).await?;

    Ok(Json(MessageResponse::ok("Prompt deleted")))
}
