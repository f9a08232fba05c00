//! Catalog Routers

use crate::application::config::CatalogConfig;
use crate::domain::repository::CatalogRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};
use crate::presentation::middleware::rate_limited;
use crate::presentation::public;
use axum::{
    Router,
    routing::{get, post},
};
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;

/// Create the admin CRUD router with PostgreSQL repository
///
/// The routes are not gated; wrap them with the admin gate when mounting.
pub fn admin_router(repo: PgCatalogRepository, config: CatalogConfig) -> Router {
    admin_router_generic(repo, config)
}

/// Create the admin CRUD router for any repository implementation
pub fn admin_router_generic<R>(repo: R, config: CatalogConfig) -> Router
where
    R: CatalogRepository,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/admin/categories",
            get(handlers::list_categories::<R>).post(handlers::create_category::<R>),
        )
        .route(
            "/admin/categories/{id}",
            get(handlers::get_category::<R>)
                .put(handlers::update_category::<R>)
                .delete(handlers::delete_category::<R>),
        )
        .route(
            "/admin/tags",
            get(handlers::list_tags::<R>).post(handlers::create_tag::<R>),
        )
        .route(
            "/admin/tags/{id}",
            get(handlers::get_tag::<R>)
                .put(handlers::update_tag::<R>)
                .delete(handlers::delete_tag::<R>),
        )
        .route(
            "/admin/prompts",
            get(handlers::list_prompts::<R>).post(handlers::create_prompt::<R>),
        )
        .route(
            "/admin/prompts/{id}",
            get(handlers::get_prompt::<R>)
                .put(handlers::update_prompt::<R>)
                .delete(handlers::delete_prompt::<R>),
        )
        .with_state(state)
}

/// Create the public router with PostgreSQL repository
pub fn public_router<S>(repo: PgCatalogRepository, limiter: Arc<S>, config: CatalogConfig) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    public_router_generic(repo, limiter, config)
}

/// Create the public router for any repository implementation
///
/// Likes draw on `limiter` with `config.like_rate_limit`.
pub fn public_router_generic<R, S>(repo: R, limiter: Arc<S>, config: CatalogConfig) -> Router
where
    R: CatalogRepository,
    S: RateLimitStore + Send + Sync + 'static,
{
    let like_limit = config.like_rate_limit;
    let state = CatalogAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let likes = rate_limited(
        Router::new().route("/api/prompts/{id}/like", post(public::like_prompt::<R>)),
        limiter,
        like_limit,
    );

    Router::new()
        .route("/api/prompts", get(public::list_prompts::<R>))
        .route("/api/prompts/{id}", get(public::get_prompt::<R>))
        .route("/api/prompts/{id}/copy", post(public::copy_prompt::<R>))
        .route("/api/categories", get(public::list_categories::<R>))
        .route(
            "/api/categories/{name}/prompts",
            get(public::category_prompts::<R>),
        )
        .route("/api/tags", get(public::list_tags::<R>))
        .route("/api/tags/{name}/prompts", get(public::tag_prompts::<R>))
        .merge(likes)
        .with_state(state)
}
