//! Section listing endpoint.

use axum::Json;
use axum::extract::{Path, State};
use focus_core::entities::Task;
use focus_core::enums::Section;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /tasks/{section}`
///
/// Unsorted; ordering is left to the client. The active list includes done
/// tasks recurring today.
pub async fn list(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let section: Section = section.parse()?;
    Ok(Json(state.service().list_section(section).await?))
}
