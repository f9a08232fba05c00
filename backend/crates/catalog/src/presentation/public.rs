//! Public HTTP Handlers

use crate::application::{EngagementUseCase, ListingQuery, PublicListingUseCase};
use crate::domain::repository::CatalogRepository;
use crate::domain::value_objects::PromptSort;
use crate::error::CatalogResult;
use crate::presentation::dto::{
    CategoryResponse, CopyResponse, LikeResponse, PromptResponse, PublicListParams,
    PublicListResponse, TagResponse,
};
use crate::presentation::handlers::CatalogAppState;
use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use kernel::id::PromptId;
use platform::client::ClientIdentity;

/// GET /api/prompts
pub async fn list_prompts<R>(
    State(state): State<CatalogAppState<R>>,
    params: Result<Query<PublicListParams>, QueryRejection>,
) -> CatalogResult<Json<PublicListResponse>>
where
    R: CatalogRepository,
{
    let Query(params) = params?;
    let query = ListingQuery {
        page: state.config.public_page(params.page, params.per_page)?,
        sort: PromptSort::parse_lenient(params.sort.as_deref()),
        category: params.category,
        tag: params.tag,
    };
    let listing = PublicListingUseCase::new(state.repo.clone())
        .home(query)
        .await?;

    Ok(Json(listing.into()))
}

/// GET /api/categories/{name}/prompts
pub async fn category_prompts<R>(
    State(state): State<CatalogAppState<R>>,
    name: Result<Path<String>, PathRejection>,
    params: Result<Query<PublicListParams>, QueryRejection>,
) -> CatalogResult<Json<PublicListResponse>>
where
    R: CatalogRepository,
{
    let Path(name) = name?;
    let Query(params) = params?;
    let page = state.config.public_page(params.page, params.per_page)?;
    let listing = PublicListingUseCase::new(state.repo.clone())
        .by_category(&name, page, PromptSort::parse_lenient(params.sort.as_deref()))
        .await?;

    Ok(Json(listing.into()))
}

/// GET /api/tags/{name}/prompts
pub async fn tag_prompts<R>(
    State(state): State<CatalogAppState<R>>,
    name: Result<Path<String>, PathRejection>,
    params: Result<Query<PublicListParams>, QueryRejection>,
) -> CatalogResult<Json<PublicListResponse>>
where
    R: CatalogRepository,
{
    let Path(name) = name?;
    let Query(params) = params?;
    let page = state.config.public_page(params.page, params.per_page)?;
    let listing = PublicListingUseCase::new(state.repo.clone())
        .by_tag(&name, page, PromptSort::parse_lenient(params.sort.as_deref()))
        .await?;

    Ok(Json(listing.into()))
}

/// GET /api/prompts/{id}
pub async fn get_prompt<R>(
    State(state): State<CatalogAppState<R>>,
    id: Result<Path<PromptId>, PathRejection>,
) -> CatalogResult<Json<PromptResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let view = PublicListingUseCase::new(state.repo.clone())
        .prompt(id)
        .await?;

    Ok(Json(view.into()))
}

/// GET /api/categories
pub async fn list_categories<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<CategoryResponse>>>
where
    R: CatalogRepository,
{
    let categories = PublicListingUseCase::new(state.repo.clone())
        .categories()
        .await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// GET /api/tags
pub async fn list_tags<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<TagResponse>>>
where
    R: CatalogRepository,
{
    let tags = PublicListingUseCase::new(state.repo.clone()).tags().await?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// POST /api/prompts/{id}/like
pub async fn like_prompt<R>(
    State(state): State<CatalogAppState<R>>,
    client: ClientIdentity,
    id: Result<Path<PromptId>, PathRejection>,
) -> CatalogResult<Json<LikeResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let outcome = EngagementUseCase::new(state.repo.clone())
        .like(id, &client)
        .await?;

    Ok(Json(LikeResponse {
        liked: outcome.liked,
        like_count: outcome.like_count,
    }))
}

/// POST /api/prompts/{id}/copy
pub async fn copy_prompt<R>(
    State(state): State<CatalogAppState<R>>,
    id: Result<Path<PromptId>, PathRejection>,
) -> CatalogResult<Json<CopyResponse>>
where
    R: CatalogRepository,
{
    let Path(id) = id?;
    let copy_count = EngagementUseCase::new(state.repo.clone()).copy(id).await?;

    Ok(Json(CopyResponse { copy_count }))
}
