use crate::domain::{PageBound, Task, TaskDraft, TaskMetrics};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct DbTask {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

impl From<DbTask> for Task {
    fn from(db_task: DbTask) -> Self {
        Task {
            id: db_task.id,
            title: db_task.title,
            status: db_task.status,
            created_at: db_task.created_at,
        }
    }
}

// body of POST /tasks and PUT /tasks/{id}; nothing is required and any JSON type is taken
#[derive(Deserialize, Debug, Default)]
pub struct TaskPayload {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

impl From<TaskPayload> for TaskDraft {
    fn from(payload: TaskPayload) -> Self {
        TaskDraft {
            title: payload.title.and_then(column_text),
            status: payload.status.and_then(column_text),
        }
    }
}

// what a TEXT column ends up holding for a given JSON value; null stays NULL
fn column_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(if b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Raw `page` / `pageSize` query values, unparsed.
#[derive(Debug, Default)]
pub struct ListTasksQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListTasksQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            page: params.get("page").cloned(),
            page_size: params.get("pageSize").cloned(),
        }
    }

    /// Returns `(limit, offset)`. No bounds checks. When a value isn't numeric its raw text is
    /// bound instead and the store rejects it.
    pub fn limit_offset(&self) -> (PageBound, PageBound) {
        let page = numeric_or_raw(self.page.as_deref(), 1.0);
        let page_size = numeric_or_raw(self.page_size.as_deref(), 10.0);

        let limit = match &page_size {
            Ok(size) => PageBound::from_number(*size),
            Err(raw) => PageBound::Text(raw.clone()),
        };

        let offset = match (page, page_size) {
            (Ok(page), Ok(size)) => PageBound::from_number((page - 1.0) * size),
            (Err(raw), _) | (_, Err(raw)) => PageBound::Text(raw),
        };

        (limit, offset)
    }
}

// blank counts as zero, like a numeric coercion of an empty string would
fn numeric_or_raw(raw: Option<&str>, default: f64) -> Result<f64, String> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| raw.to_string())
}

#[derive(Serialize, Debug)]
pub struct JsonTask {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: Option<String>,
}

impl From<&Task> for JsonTask {
    fn from(task: &Task) -> Self {
        JsonTask {
            id: task.id,
            title: task.title.to_owned(),
            status: task.status.to_owned(),
            created_at: task
                .created_at
                .map(|val| val.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: &'static str,
    pub task_id: i64,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct JsonTaskMetrics {
    pub open_tasks: i64,
    pub inprogress_tasks: i64,
    pub completed_tasks: i64,
}

impl From<TaskMetrics> for JsonTaskMetrics {
    fn from(metrics: TaskMetrics) -> Self {
        JsonTaskMetrics {
            open_tasks: metrics.open_tasks,
            inprogress_tasks: metrics.inprogress_tasks,
            completed_tasks: metrics.completed_tasks,
        }
    }
}
