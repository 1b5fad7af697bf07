//! HTTP handlers for the task resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use taskboard_core::ids::TaskId;
use taskboard_store::{StoreError, TaskFields, TaskRow};

use crate::server::AppState;

/// Maps repository outcomes onto the HTTP contract: a missing mutation
/// target is 404 `{"message": "Task not found"}`, any other store fault
/// is 500 `{"error": <message>}`.
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            StoreError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": "Task not found" })),
            )
                .into_response(),
            other => {
                tracing::error!(error = %other, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// PUT response body: an echo of the submitted fields plus the id.
/// The stored createdDate is deliberately not re-read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEcho {
    pub id: TaskId,
    pub task_title: Option<String>,
    pub description: Option<String>,
    pub date_due: Option<String>,
    pub status: Option<String>,
}

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskRow>>, ApiError> {
    let tasks = state.repo.list()?;
    Ok(Json(tasks))
}

/// POST /tasks — the body only ever deserializes the four mutable fields,
/// so a client-supplied id or createdDate is dropped before it can stick.
pub async fn create_task(
    State(state): State<AppState>,
    Json(fields): Json<TaskFields>,
) -> Result<(StatusCode, Json<TaskRow>), ApiError> {
    let task = state.repo.create(fields)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id} — full replace of the four mutable fields.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(fields): Json<TaskFields>,
) -> Result<Json<TaskEcho>, ApiError> {
    state.repo.update(&id, fields.clone())?;
    Ok(Json(TaskEcho {
        id,
        task_title: fields.task_title,
        description: fields.description,
        date_due: fields.date_due,
        status: fields.status,
    }))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    state.repo.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check HTTP endpoint.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state
        .db
        .with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(StoreError::from)
        })
        .is_ok();

    let http_status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status = if healthy { "healthy" } else { "unhealthy" };

    (http_status, Json(serde_json::json!({ "status": status })))
}
