//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Missing records become 404,
//! rejected input becomes 400, and anything else is logged and reported as a
//! bare 500 so storage details never reach the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use focus_core::errors::CoreError;
use focus_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The referenced task does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request body or path failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// Storage or internal failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound { .. } => Self::NotFound(error.to_string()),
            CoreError::Validation(message) => Self::BadRequest(message),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(core) => core.into(),
            other => Self::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal(error) => {
                tracing::error!("request failed: {error:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
