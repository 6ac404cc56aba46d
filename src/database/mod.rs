use crate::domain::{PageBound, Task, TaskDraft};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// a taskrepository is shared between every handler through the router state
// sqlx::Pool is thread safe, sqlite serializes the statements on its single connection
#[async_trait]
pub trait TaskRepository: Send + Sync {
    // read operations
    async fn list_tasks(&self, limit: &PageBound, offset: &PageBound) -> Result<Vec<Task>>;
    async fn count_tasks_by_status(&self, status: &str) -> Result<i64>;

    // write operations
    async fn insert_task(&self, draft: &TaskDraft) -> Result<i64>;
    // ids are bound as given (path text); both return the number of rows touched
    async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<u64>;
    async fn delete_task(&self, id: &str) -> Result<u64>;
}
