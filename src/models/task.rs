use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Request body of `POST /tasks/post`.
///
/// `title` is the only field read; anything else in the body is ignored.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// The title of the task. Must be present and non-empty.
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub title: Option<String>,
}

impl CreateTaskRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

/// A to-do item as stored and as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4), assigned at creation.
    pub id: Uuid,
    pub title: String,
    /// `false` at creation, flipped by the complete operation.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every toggle.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, not yet completed task with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flips `completed` and bumps `updated_at`.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.updated_at = Utc::now();
    }
}
