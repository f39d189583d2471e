//! Route handlers, grouped the way the URL space is.
//!
//! - `/task` and `/task/{id}/...`: single-record lifecycle (`task`)
//! - `/tasks/{section}`: section listing (`tasks`)
//! - `/health`: liveness probe

pub mod task;
pub mod tasks;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;

use crate::error::ApiError;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Turn a body extraction failure into a 400 with the usual error shape.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}
