use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a task.
///
/// Deliberately carries no owner field: the owner is always the authenticated
/// identity, and any owner-like key in the request body is dropped during
/// deserialization rather than trusted.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 8 and 50 characters.
    #[validate(length(min = 8, max = 50))]
    pub title: String,

    /// An optional description, between 16 and 200 characters if provided.
    #[validate(length(min = 16, max = 200))]
    pub description: Option<String>,

    /// Completion flag, defaults to false.
    #[serde(default)]
    pub completed: bool,

    /// The due date for the task.
    pub due_date: DateTime<Utc>,
}

/// Partial update for a task. Every field is optional but at least one must
/// be present; like [`TaskInput`], there is no owner field to tamper with.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct TaskUpdate {
    #[validate(length(min = 8, max = 50))]
    pub title: Option<String>,

    #[validate(length(min = 16, max = 200))]
    pub description: Option<String>,

    pub completed: Option<bool>,

    pub due_date: Option<DateTime<Utc>>,
}

impl TaskUpdate {
    /// An update carrying no fields is a validation error, not a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.due_date.is_none()
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Identifier of the user who owns the task. Immutable after creation.
    pub user_id: i32,
}

impl Task {
    /// Creates a new `Task` from validated input and the owner's id.
    /// `created_at` and `updated_at` are set to the current time.
    pub fn new(input: TaskInput, owner_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            completed: input.completed,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            user_id: owner_id,
        }
    }

    /// Applies a partial update in place, bumping `updated_at`. The id and
    /// owner are untouchable by construction.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        self.updated_at = Utc::now();
    }
}
