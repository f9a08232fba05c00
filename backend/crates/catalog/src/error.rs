//! Catalog Error Types
//!
//! This module provides catalog-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{CategoryId, PromptId, TagId};
use platform::rate_limit::RateLimitError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input failed a field rule (length, format, range)
    #[error("{0}")]
    Validation(String),

    #[error("Category {0} not found")]
    CategoryNotFound(CategoryId),

    #[error("Tag {0} not found")]
    TagNotFound(TagId),

    #[error("Prompt {0} not found")]
    PromptNotFound(PromptId),

    #[error("Category '{0}' not found")]
    CategoryNameNotFound(String),

    #[error("Tag '{0}' not found")]
    TagNameNotFound(String),

    /// A prompt write referenced a category that does not exist
    #[error("Category {0} does not exist")]
    MissingCategory(CategoryId),

    /// A prompt write referenced a tag that does not exist
    #[error("Tag {0} does not exist")]
    MissingTag(TagId),

    /// The store rejected a prompt write on a foreign key
    #[error("Referenced category or tag no longer exists")]
    DanglingReference,

    #[error("Category name '{0}' already exists")]
    DuplicateCategoryName(String),

    #[error("Tag name '{0}' already exists")]
    DuplicateTagName(String),

    #[error("Category has {prompts} associated prompts; use force=true to delete them too")]
    CategoryInUse { prompts: i64 },

    #[error("Tag is used by {associations} prompts; use force=true to detach it")]
    TagInUse { associations: i64 },

    #[error("Too many requests, please retry in {retry_after_secs} seconds")]
    RateLimitExceeded {
        retry_after_secs: u64,
        window_minutes: u64,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::UnprocessableEntity,
            CatalogError::CategoryNotFound(_)
            | CatalogError::TagNotFound(_)
            | CatalogError::PromptNotFound(_)
            | CatalogError::CategoryNameNotFound(_)
            | CatalogError::TagNameNotFound(_) => ErrorKind::NotFound,
            CatalogError::MissingCategory(_)
            | CatalogError::MissingTag(_)
            | CatalogError::DanglingReference
            | CatalogError::DuplicateCategoryName(_)
            | CatalogError::DuplicateTagName(_)
            | CatalogError::CategoryInUse { .. }
            | CatalogError::TagInUse { .. } => ErrorKind::BadRequest,
            CatalogError::RateLimitExceeded { .. } => ErrorKind::TooManyRequests,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::RateLimitExceeded {
                retry_after_secs, ..
            } => {
                tracing::warn!(retry_after_secs, "Rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            // Storage details stay in the logs
            CatalogError::Database(e) => AppError::internal("Database error").with_source(e),
            CatalogError::RateLimitExceeded { window_minutes, .. } => {
                let unit = if window_minutes == 1 { "minute" } else { "minutes" };
                AppError::too_many_requests(message)
                    .with_action(format!("Retry in {} {}", window_minutes, unit))
            }
            _ => AppError::new(kind, message),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        let retry_after = match &self {
            CatalogError::RateLimitExceeded {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        };

        let mut response = AppError::from(self).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

impl From<RateLimitError> for CatalogError {
    fn from(err: RateLimitError) -> Self {
        CatalogError::Internal(err.to_string())
    }
}

impl From<QueryRejection> for CatalogError {
    fn from(rejection: QueryRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for CatalogError {
    fn from(rejection: PathRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}
