use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::form::export::ExportError;
use crate::form::validators::ValidationFailure;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A submission that did not pass the contact checks.
    #[error("Validation error: {0}")]
    Rejected(#[from] ValidationFailure),

    /// A request body that is not valid JSON or not a known shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Session limit of {0} reached")]
    SessionLimit(usize),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Rejected(failure) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                failure.to_string(),
            ),
            AppError::InvalidBody(rejection) => {
                (rejection.status(), "INVALID_BODY", rejection.body_text())
            }
            AppError::SessionLimit(capacity) => {
                tracing::warn!("Refusing new form session: {capacity} already open");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SESSION_LIMIT",
                    "Too many open forms, try again later".to_string(),
                )
            }
            AppError::Export(ExportError::Unavailable(msg)) => (
                StatusCode::NOT_IMPLEMENTED,
                "EXPORT_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        // Rejections also name the field the client should focus.
        if let AppError::Rejected(failure) = &self {
            error["field"] = json!(failure.focus());
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
