use crate::database::TaskRepository;
use crate::domain::{PageBound, Task, TaskDraft};
use crate::tests::api_tasks_router::send;
use crate::{AppState, build_router};
use anyhow::{Result, bail};
use async_trait::async_trait;
use axum::{Router, http::StatusCode};
use serde_json::json;
use std::sync::{Arc, Mutex};

// --- Manual Mock: TaskRepository ---
// stands in for a broken store. every statement it is asked to run gets recorded, and
// counting fails once it reaches `fail_on_status`
#[derive(Clone, Default)]
pub struct FailingRepository {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_on_status: Option<&'static str>,
}

impl FailingRepository {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TaskRepository for FailingRepository {
    async fn list_tasks(&self, limit: &PageBound, offset: &PageBound) -> Result<Vec<Task>> {
        self.record(format!("list {} {}", limit, offset));
        bail!("disk I/O error")
    }

    async fn count_tasks_by_status(&self, status: &str) -> Result<i64> {
        self.record(format!("count {}", status));
        match self.fail_on_status {
            Some(failing) if failing == status => bail!("database is locked"),
            _ => Ok(3),
        }
    }

    async fn insert_task(&self, _draft: &TaskDraft) -> Result<i64> {
        self.record("insert".to_string());
        bail!("disk I/O error")
    }

    async fn update_task(&self, id: &str, _draft: &TaskDraft) -> Result<u64> {
        self.record(format!("update {}", id));
        bail!("disk I/O error")
    }

    async fn delete_task(&self, id: &str) -> Result<u64> {
        self.record(format!("delete {}", id));
        bail!("disk I/O error")
    }
}

fn app_with(repo: FailingRepository) -> Router {
    build_router(AppState {
        repo: Arc::new(repo),
    })
}

// storage details must never leak to the client
#[tokio::test]
async fn test_storage_errors_are_generic_500s() {
    let app = app_with(FailingRepository::default());
    let body = Some(json!({ "title": "t", "status": "open" }));

    let cases = [
        ("POST", "/tasks", body.clone(), "Failed to create task"),
        ("PUT", "/tasks/1", body, "Failed to update task"),
        ("GET", "/tasks", None, "Failed to fetch tasks"),
        ("DELETE", "/tasks/1", None, "Failed to delete task"),
    ];

    for (method, uri, body, message) in cases {
        let (code, json) = send(&app, method, uri, body).await;
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(json, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_metrics_short_circuits_on_failure() {
    let repo = FailingRepository {
        fail_on_status: Some("inprogress"),
        ..Default::default()
    };
    let calls = repo.calls.clone();
    let app = app_with(repo);

    let (code, json) = send(&app, "GET", "/task-metrics", None).await;

    assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Failed to fetch task metrics" }));
    // the completed count is never attempted
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["count open".to_string(), "count inprogress".to_string()]
    );
}

// metrics are queried in a fixed order: open, inprogress, completed
#[tokio::test]
async fn test_metrics_query_order() {
    let repo = FailingRepository::default();
    let calls = repo.calls.clone();
    let app = app_with(repo);

    let (code, json) = send(&app, "GET", "/task-metrics", None).await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "open_tasks": 3, "inprogress_tasks": 3, "completed_tasks": 3 })
    );
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "count open".to_string(),
            "count inprogress".to_string(),
            "count completed".to_string()
        ]
    );
}

// a bad id is turned away before the store is touched
#[tokio::test]
async fn test_delete_invalid_id_skips_storage() {
    let repo = FailingRepository::default();
    let calls = repo.calls.clone();
    let app = app_with(repo);

    let (code, _) = send(&app, "DELETE", "/tasks/abc", None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(calls.lock().unwrap().is_empty());

    // the path text goes to the store untouched
    send(&app, "DELETE", "/tasks/12abc", None).await;
    assert_eq!(*calls.lock().unwrap(), vec!["delete 12abc".to_string()]);
}

// paging arithmetic reaches the store as limit/offset
#[tokio::test]
async fn test_list_passes_limit_and_offset() {
    let repo = FailingRepository::default();
    let calls = repo.calls.clone();
    let app = app_with(repo);

    send(&app, "GET", "/tasks?page=3&pageSize=7", None).await;
    send(&app, "GET", "/tasks", None).await;
    send(&app, "GET", "/tasks?page=two&pageSize=5", None).await;
    send(&app, "GET", "/tasks?page=2&pageSize=2.5", None).await;

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "list 7 14".to_string(),
            "list 10 0".to_string(),
            "list 5 'two'".to_string(),
            "list 2.5 2.5".to_string(),
        ]
    );
}
