pub mod error;
pub mod model;

use crate::AppState;
use crate::domain::{TaskDraft, TaskMetrics};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use error::{ApiError, StorageAction};
use model::{
    CreatedResponse, JsonTask, JsonTaskMetrics, ListTasksQuery, MessageResponse, TaskPayload,
};
use std::collections::HashMap;

pub fn tasks_router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}",
            put(update_task_handler).delete(delete_task_handler),
        )
        .route("/task-metrics", get(task_metrics_handler))
}

async fn create_task_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let draft = draft_from(payload);

    let task_id = state
        .repo
        .insert_task(&draft)
        .await
        .map_err(|e| ApiError::storage(StorageAction::Create, e))?;

    tracing::debug!(task_id, "task created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Task created successfully",
            task_id,
        }),
    ))
}

// reports success whether or not `id` matched a row
async fn update_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let draft = draft_from(payload);

    let rows = state
        .repo
        .update_task(&id, &draft)
        .await
        .map_err(|e| ApiError::storage(StorageAction::Update, e))?;

    tracing::debug!(%id, rows, "task update applied");

    Ok(Json(MessageResponse {
        message: "Task updated successfully",
    }))
}

async fn list_tasks_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<JsonTask>>, ApiError> {
    let (limit, offset) = ListTasksQuery::from_params(&params).limit_offset();

    let tasks = state
        .repo
        .list_tasks(&limit, &offset)
        .await
        .map_err(|e| ApiError::storage(StorageAction::List, e))?;

    Ok(Json(tasks.iter().map(JsonTask::from).collect()))
}

// three reads in a row, no transaction; the first failure ends the request
async fn task_metrics_handler(
    State(state): State<AppState>,
) -> Result<Json<JsonTaskMetrics>, ApiError> {
    let fail = |e| ApiError::storage(StorageAction::Metrics, e);

    let open_tasks = state.repo.count_tasks_by_status("open").await.map_err(fail)?;
    let inprogress_tasks = state
        .repo
        .count_tasks_by_status("inprogress")
        .await
        .map_err(fail)?;
    let completed_tasks = state
        .repo
        .count_tasks_by_status("completed")
        .await
        .map_err(fail)?;

    let metrics = TaskMetrics {
        open_tasks,
        inprogress_tasks,
        completed_tasks,
    };

    Ok(Json(metrics.into()))
}

async fn delete_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !has_integer_prefix(&id) {
        return Err(ApiError::InvalidTaskId);
    }

    // bound as given, so "12abc" passes the check above but matches nothing
    let rows = state
        .repo
        .delete_task(&id)
        .await
        .map_err(|e| ApiError::storage(StorageAction::Delete, e))?;

    if rows == 0 {
        return Err(ApiError::TaskNotFound);
    }

    tracing::debug!(%id, "task deleted");

    Ok(Json(MessageResponse {
        message: "Task deleted successfully",
    }))
}

// a missing, mistyped or unparsable body is an empty one; the store has the final say
fn draft_from(payload: Result<Json<TaskPayload>, JsonRejection>) -> TaskDraft {
    match payload {
        Ok(Json(payload)) => TaskDraft::from(payload),
        Err(rejection) => {
            tracing::debug!(%rejection, "unusable task body, binding nulls");
            TaskDraft::default()
        }
    }
}

/// Leading whitespace, an optional sign, then at least one digit. Whatever follows is ignored.
pub fn has_integer_prefix(id: &str) -> bool {
    let rest = id.trim_start();
    let rest = rest.strip_prefix(['+', '-']).unwrap_or(rest);
    rest.starts_with(|c: char| c.is_ascii_digit())
}
