//! Single-task endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use focus_core::entities::Task;
use focus_db::updates::task::{NewTask, TaskUpdate};

use super::json_body;
use crate::error::ApiError;
use crate::state::AppState;

/// `POST /task`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let draft = json_body(payload)?;
    let task = state.service().create_task(draft).await?;
    tracing::info!(task_id = %task.id, "created task");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /task/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.service().get_task(&task_id).await?))
}

/// `PUT /task/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<TaskUpdate>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let update = json_body(payload)?;
    Ok(Json(state.service().update_task(&task_id, update).await?))
}

/// `DELETE /task/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service().delete_task(&task_id).await?;
    tracing::info!(%task_id, "deleted task");
    Ok(Json(serde_json::json!({
        "message": format!("Task with ID {task_id} deleted")
    })))
}

/// `POST /task/{id}/complete`
pub async fn complete(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.service().complete_task(&task_id).await?))
}

/// `POST /task/{id}/activate`
pub async fn activate(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.service().activate_task(&task_id).await?))
}
