//! Error responses for the inventory API.
//!
//! Unknown resources answer 404 with an empty JSON object, which is what
//! storefront clients expect from the inventory endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the inventory API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(resource) => {
                tracing::debug!(%resource, "Resource not found");
                (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
