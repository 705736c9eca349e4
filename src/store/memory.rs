use futures::future::BoxFuture;
use tokio::sync::RwLock;

use super::{parse_task_id, StoreError, TaskStore};
use crate::models::Task;

/// In-process task store. Insertion order is list order.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

impl TaskStore for MemoryTaskStore {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Task>, StoreError>> {
        Box::pin(async move { Ok(self.tasks.read().await.clone()) })
    }

    fn create(&self, title: String) -> BoxFuture<'_, Result<Task, StoreError>> {
        Box::pin(async move {
            if title.is_empty() {
                return Err(StoreError::Rejected("title is required".into()));
            }
            let task = Task::new(title);
            self.tasks.write().await.push(task.clone());
            Ok(task)
        })
    }

    fn toggle_complete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Task, StoreError>> {
        Box::pin(async move {
            let id = parse_task_id(id)?;
            let mut tasks = self.tasks.write().await;
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or(StoreError::NotFound(id))?;
            task.toggle();
            Ok(task.clone())
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let id = parse_task_id(id)?;
            let mut tasks = self.tasks.write().await;
            let position = tasks
                .iter()
                .position(|task| task.id == id)
                .ok_or(StoreError::NotFound(id))?;
            tasks.remove(position);
            Ok(())
        })
    }
}
