//! Unit tests for Auth crate

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;
    use crate::error::AuthError;

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert_eq!(config.credentials.username(), "admin");
        assert!(config.credentials.verify("admin", "admin123"));
    }

    #[test]
    fn test_from_lookup_uses_values() {
        let config = AuthConfig::from_lookup(|key| match key {
            "ADMIN_USERNAME" => Some("curator".to_string()),
            "ADMIN_PASSWORD" => Some("s3cret".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(config.credentials.verify("curator", "s3cret"));
        assert!(!config.credentials.verify("admin", "admin123"));
    }

    #[test]
    fn test_from_lookup_default_username() {
        let config = AuthConfig::from_lookup(|key| {
            (key == "ADMIN_PASSWORD").then(|| "pw".to_string())
        })
        .unwrap();
        assert_eq!(config.credentials.username(), DEFAULT_ADMIN_USERNAME);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_missing_password_falls_back_in_debug() {
        let config = AuthConfig::from_lookup(|_| None).unwrap();
        assert!(config.credentials.verify("admin", DEV_ADMIN_PASSWORD));
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_missing_password_rejected_in_release() {
        let err = AuthConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, AuthError::MissingConfig("ADMIN_PASSWORD")));
    }

    #[test]
    fn test_missing_config_display() {
        assert!(
            AuthError::MissingConfig("ADMIN_PASSWORD")
                .to_string()
                .contains("ADMIN_PASSWORD")
        );
    }
}

#[cfg(test)]
mod use_case_tests {
    use crate::application::{AuthConfig, VerifyAdminUseCase};
    use crate::error::AuthError;
    use platform::basic_auth::BasicCredentials;
    use std::sync::Arc;

    fn creds(username: &str, password: &str) -> BasicCredentials {
        BasicCredentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_verify_admin() {
        let use_case = VerifyAdminUseCase::new(Arc::new(AuthConfig::new("admin", "pw")));

        assert_eq!(use_case.execute(Some(&creds("admin", "pw"))).unwrap(), "admin");
        assert!(matches!(
            use_case.execute(Some(&creds("admin", "nope"))),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            use_case.execute(Some(&creds("nope", "pw"))),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            use_case.execute(None),
            Err(AuthError::InvalidCredentials)
        ));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let response = AuthError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_CHALLENGE
        );

        let response = AuthError::MissingConfig("ADMIN_PASSWORD").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}

#[cfg(test)]
mod router_tests {
    use crate::application::AuthConfig;
    use crate::presentation::router::auth_router;
    use crate::presentation::middleware::{AdminPrincipal, with_admin_gate};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use axum::{Extension, Router};
    use platform::crypto::to_base64;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new("admin", "admin123"))
    }

    fn basic(username: &str, password: &str) -> String {
        format!("Basic {}", to_base64(format!("{}:{}", username, password).as_bytes()))
    }

    fn get_admin(authorization: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().uri("/admin");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_requires_credentials() {
        let response = auth_router(config()).oneshot(get_admin(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn test_wrong_username_and_wrong_password_look_the_same() {
        let wrong_user = auth_router(config())
            .oneshot(get_admin(Some(basic("root", "admin123"))))
            .await
            .unwrap();
        let wrong_pass = auth_router(config())
            .oneshot(get_admin(Some(basic("admin", "letmein"))))
            .await
            .unwrap();

        assert_eq!(wrong_user.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_pass.status(), StatusCode::UNAUTHORIZED);

        let a = to_bytes(wrong_user.into_body(), usize::MAX).await.unwrap();
        let b = to_bytes(wrong_pass.into_body(), usize::MAX).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_dashboard_with_valid_credentials() {
        let response = auth_router(config())
            .oneshot(get_admin(Some(basic("admin", "admin123"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["admin_verified"], true);
        assert_eq!(json["username"], "admin");
        assert!(json["available_endpoints"].as_array().unwrap().len() > 1);
    }

    #[tokio::test]
    async fn test_gate_wraps_arbitrary_routes() {
        let inner = Router::new().route(
            "/admin/ping",
            get(|Extension(admin): Extension<AdminPrincipal>| async move { admin.username }),
        );
        let app = with_admin_gate(inner, config());

        let denied = app
            .clone()
            .oneshot(Request::builder().uri("/admin/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

        let allowed = app
            .oneshot(
                Request::builder()
                    .uri("/admin/ping")
                    .header(header::AUTHORIZATION, basic("admin", "admin123"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);
        let body = to_bytes(allowed.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"admin");
    }
}
