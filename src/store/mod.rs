//! Task persistence.
//!
//! Handlers only see the [`TaskStore`] trait. [`PgTaskStore`] backs the real
//! server; [`MemoryTaskStore`] keeps tasks in process and is used by the tests.
//! Every mutating method is a single atomic operation on one record.

pub mod memory;
pub mod postgres;

use futures::future::BoxFuture;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Task;

pub use memory::MemoryTaskStore;
pub use postgres::PgTaskStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No task has the requested id.
    #[error("task {0} not found")]
    NotFound(Uuid),
    /// The id is not something the store can address.
    #[error("malformed task id: {0:?}")]
    MalformedId(String),
    /// The store refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Parses a path segment into a task id.
pub fn parse_task_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::MalformedId(raw.to_string()))
}

/// CRUD over the single shared task collection.
pub trait TaskStore: Send + Sync {
    /// All tasks, oldest first.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Task>, StoreError>>;

    /// Persists a new task with `completed = false`.
    fn create(&self, title: String) -> BoxFuture<'_, Result<Task, StoreError>>;

    /// Flips `completed` on the task with id `id` and returns the updated record.
    fn toggle_complete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Task, StoreError>>;

    /// Removes the task with id `id` permanently.
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;
}
