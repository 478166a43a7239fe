use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sitepulse_core::validate::Violation;
use sitepulse_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StoreError`] for store failures and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses;
/// no error here is fatal to the process -- every failure degrades to a
/// JSON message the dashboard renders inline.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure from the record store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A rejected submission, every violation listed individually.
    #[error("Validation failed")]
    Validation(Vec<Violation>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A conflicting request (duplicate project name).
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Store(store) => classify_store_error(store),
            AppError::Validation(violations) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "details": violations,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// Configuration problems block the operation but keep the view up;
/// transient I/O maps to gateway-style statuses with no retry.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Credentials(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "CREDENTIALS", err.to_string())
        }
        StoreError::InvalidSheetUrl(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "CONFIG", err.to_string())
        }
        StoreError::MissingColumns(_) => {
            (StatusCode::BAD_REQUEST, "MISSING_COLUMNS", err.to_string())
        }
        StoreError::Unreachable(msg) => {
            tracing::error!(error = %msg, "Store unreachable");
            (StatusCode::BAD_GATEWAY, "STORE_UNREACHABLE", err.to_string())
        }
        StoreError::Unauthorized(msg) => {
            tracing::error!(error = %msg, "Store rejected credentials");
            (StatusCode::UNAUTHORIZED, "STORE_UNAUTHORIZED", err.to_string())
        }
        StoreError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Job {id} not found"),
        ),
        StoreError::StaleWrite => (StatusCode::CONFLICT, "STALE_WRITE", err.to_string()),
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "Store backend error");
            (StatusCode::BAD_GATEWAY, "STORE_ERROR", err.to_string())
        }
    }
}
