use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use derive_more::derive::Display;
use serde_json::json;

/// Which storage operation failed. Only used to pick the generic message sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StorageAction {
    #[display("Failed to create task")]
    Create,
    #[display("Failed to update task")]
    Update,
    #[display("Failed to fetch tasks")]
    List,
    #[display("Failed to fetch task metrics")]
    Metrics,
    #[display("Failed to delete task")]
    Delete,
}

#[derive(Debug, Display)]
pub enum ApiError {
    #[display("Invalid task ID")]
    InvalidTaskId,
    #[display("Task not found")]
    TaskNotFound,
    #[display("{_0}")]
    Storage(StorageAction),
}

impl ApiError {
    /// Logs the underlying storage error and collapses it into a generic 500.
    pub fn storage(action: StorageAction, err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "{}", action);
        ApiError::Storage(action)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidTaskId => StatusCode::BAD_REQUEST,
            ApiError::TaskNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
