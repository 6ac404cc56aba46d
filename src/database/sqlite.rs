use crate::config::TaskboardConfig;
use crate::database::TaskRepository;
use crate::domain::{PageBound, Task, TaskDraft};
use crate::features::tasks::model::DbTask;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::migrate::MigrateDatabase;
use sqlx::query::QueryAs;
use sqlx::sqlite::{SqliteArguments, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

const CREATE_TASKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Opens (creating it if needed) the store behind `config.database_url` and makes sure the
/// `tasks` table exists. Safe to call on every start.
pub async fn initialize(config: &TaskboardConfig) -> Result<Pool<Sqlite>> {
    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        tracing::info!(
            "No database at {}, creating...",
            config.database_url
        );
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    // connections are never recycled, an in-memory store only lives as long as its connection
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    ensure_schema(&pool).await?;

    Ok(pool)
}

pub async fn ensure_schema(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(CREATE_TASKS_TABLE)
        .execute(pool)
        .await
        .context("Failed to create tasks table")?;

    Ok(())
}

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn list_tasks(&self, limit: &PageBound, offset: &PageBound) -> Result<Vec<Task>> {
        // no ORDER BY, rows come back in whatever order sqlite scans them
        let query = sqlx::query_as::<_, DbTask>(
            "SELECT id, title, status, created_at FROM tasks LIMIT ? OFFSET ?",
        );
        let db_tasks = bind_page_bound(bind_page_bound(query, limit), offset)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list tasks (LIMIT {} OFFSET {})", limit, offset))?;

        Ok(db_tasks.into_iter().map(Task::from).collect())
    }

    async fn count_tasks_by_status(&self, status: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE status = ?")
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to count tasks with status {}", status))?;

        Ok(count.unwrap_or(0))
    }

    async fn insert_task(&self, draft: &TaskDraft) -> Result<i64> {
        let result = sqlx::query("INSERT INTO tasks (title, status) VALUES (?, ?)")
            .bind(draft.title.as_deref())
            .bind(draft.status.as_deref())
            .execute(&self.pool)
            .await
            .context("Failed to insert task")?;

        Ok(result.last_insert_rowid())
    }

    async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<u64> {
        let result = sqlx::query("UPDATE tasks SET title = ?, status = ? WHERE id = ?")
            .bind(draft.title.as_deref())
            .bind(draft.status.as_deref())
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update task {}", id))?;

        Ok(result.rows_affected())
    }

    async fn delete_task(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete task {}", id))?;

        Ok(result.rows_affected())
    }
}

// a non-integer LIMIT/OFFSET makes sqlite fail with "datatype mismatch"
fn bind_page_bound<'q>(
    query: QueryAs<'q, Sqlite, DbTask, SqliteArguments<'q>>,
    bound: &PageBound,
) -> QueryAs<'q, Sqlite, DbTask, SqliteArguments<'q>> {
    match bound {
        PageBound::Integer(value) => query.bind(*value),
        PageBound::Real(value) => query.bind(*value),
        PageBound::Text(value) => query.bind(value.clone()),
    }
}
