use futures::future::BoxFuture;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{parse_task_id, StoreError, TaskStore};
use crate::models::Task;

const TASK_COLUMNS: &str = "id, title, completed, created_at, updated_at";

/// Task store backed by the `tasks` table.
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies the embedded migrations. Any failure here is fatal to startup.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

impl TaskStore for PgTaskStore {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Task>, StoreError>> {
        Box::pin(async move {
            let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at, id");
            let tasks = sqlx::query_as::<_, Task>(&sql)
                .fetch_all(&self.pool)
                .await?;
            Ok(tasks)
        })
    }

    fn create(&self, title: String) -> BoxFuture<'_, Result<Task, StoreError>> {
        Box::pin(async move {
            let task = Task::new(title);
            let sql = format!(
                "INSERT INTO tasks (id, title, completed, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {TASK_COLUMNS}"
            );
            sqlx::query_as::<_, Task>(&sql)
                .bind(task.id)
                .bind(&task.title)
                .bind(task.completed)
                .bind(task.created_at)
                .bind(task.updated_at)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| match e {
                    // check constraint on empty titles
                    sqlx::Error::Database(db) => StoreError::Rejected(db.message().to_string()),
                    other => StoreError::Database(other),
                })
        })
    }

    fn toggle_complete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Task, StoreError>> {
        Box::pin(async move {
            let id = parse_task_id(id)?;
            let sql = format!(
                "UPDATE tasks SET completed = NOT completed, updated_at = now() \
                 WHERE id = $1 RETURNING {TASK_COLUMNS}"
            );
            sqlx::query_as::<_, Task>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound(id))
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let id = parse_task_id(id)?;
            let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
    }
}
