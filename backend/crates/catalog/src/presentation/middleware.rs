//! Rate Limit Middleware

use axum::Router;
use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use chrono::Utc;
use platform::client::ClientIdentity;
use platform::rate_limit::{RateLimitConfig, RateLimitStore};
use std::sync::Arc;

use crate::error::CatalogError;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Middleware state: the shared store plus this route's quota
pub struct RateLimitGuard<S> {
    pub store: Arc<S>,
    pub config: RateLimitConfig,
}

impl<S> Clone for RateLimitGuard<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config,
        }
    }
}

/// Middleware that counts the request against the caller's quota
///
/// A rejected request is not counted and gets 429 with `Retry-After`.
pub async fn enforce_rate_limit<S>(
    State(guard): State<RateLimitGuard<S>>,
    client: ClientIdentity,
    req: Request,
    next: Next,
) -> Result<Response, CatalogError>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let result = guard
        .store
        .check_and_increment(client.key(), &guard.config)
        .await?;

    if !result.allowed {
        tracing::warn!(
            client = %client.key(),
            path = %req.uri().path(),
            count = result.count,
            "Rate limit exceeded"
        );
        return Err(CatalogError::RateLimitExceeded {
            retry_after_secs: result.retry_after_secs(Utc::now()),
            window_minutes: guard.config.window_minutes(),
        });
    }

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(REMAINING_HEADER, HeaderValue::from(result.remaining));
    Ok(response)
}

/// Put every route of `router` behind a rate limit drawn from `store`
pub fn rate_limited<T, S>(router: Router<T>, store: Arc<S>, config: RateLimitConfig) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
    S: RateLimitStore + Send + Sync + 'static,
{
    let guard = RateLimitGuard { store, config };
    router.route_layer(middleware::from_fn_with_state(guard, enforce_rate_limit::<S>))
}
