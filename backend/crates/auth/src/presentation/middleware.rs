//! Admin Gate Middleware

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use platform::basic_auth::parse_basic_credentials;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::VerifyAdminUseCase;
use crate::error::AuthError;

/// Verified admin, stored in request extensions by [`require_admin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPrincipal {
    pub username: String,
}

/// Middleware that requires valid admin Basic credentials
pub async fn require_admin(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let presented = parse_basic_credentials(req.headers());
    let username = VerifyAdminUseCase::new(config).execute(presented.as_ref())?;

    tracing::debug!(username = %username, path = %req.uri().path(), "Admin verified");
    req.extensions_mut().insert(AdminPrincipal { username });

    Ok(next.run(req).await)
}

/// Put every route of `router` behind the admin gate
pub fn with_admin_gate<S>(router: Router<S>, config: Arc<AuthConfig>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(config, require_admin))
}
