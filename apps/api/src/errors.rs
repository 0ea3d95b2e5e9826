use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::content::entries::EditError;
use crate::publish::PublishError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Revision fetch failed: {0}")]
    RevisionFetch(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::EntryNotFound { .. } => AppError::NotFound(err.to_string()),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::Busy => AppError::Conflict(err.to_string()),
            PublishError::MissingToken | PublishError::Invalid(_) => {
                AppError::Validation(err.to_string())
            }
            PublishError::RevisionFetch { .. } => AppError::RevisionFetch(err.to_string()),
            PublishError::Rejected { .. } => AppError::Publish(err.to_string()),
            PublishError::Render(e) => AppError::Internal(e.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            // Hosting API failures are shown to the user verbatim.
            AppError::RevisionFetch(msg) => {
                tracing::warn!("Revision fetch error: {msg}");
                (StatusCode::BAD_GATEWAY, "REVISION_FETCH_ERROR", msg.clone())
            }
            AppError::Publish(msg) => {
                tracing::warn!("Publish error: {msg}");
                (StatusCode::BAD_GATEWAY, "PUBLISH_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
