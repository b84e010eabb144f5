use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskUpdate, User};
use crate::store::{TaskStore, UserStore};

const USER_COLUMNS: &str = "id, name, email, password_hash, verified, created_at";
const TASK_COLUMNS: &str = "id, title, description, completed, due_date, created_at, updated_at, user_id";

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|db| matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation))
        .unwrap_or(false)
}

/// Postgres-backed user store. The schema lives in `schema.sql`.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // The unique index is the backstop for registrations racing
                // past the find_by_email check.
                if is_unique_violation(&e) {
                    AppError::DuplicateEmail
                } else {
                    e.into()
                }
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn mark_verified(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET verified = TRUE WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("DELETE FROM users WHERE id = $1 RETURNING {}", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

/// Postgres-backed task store. Updates and deletes are single statements
/// filtered on `(id, user_id)`, so a concurrent delete and update on the same
/// task resolve deterministically: the later one observes "not found".
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, task: Task) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (id, title, description, completed, due_date, created_at, updated_at, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.completed)
            .bind(task.due_date)
            .bind(task.created_at)
            .bind(task.updated_at)
            .bind(task.user_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
        update: TaskUpdate,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks \
             SET title = COALESCE($1, title), \
                 description = COALESCE($2, description), \
                 completed = COALESCE($3, completed), \
                 due_date = COALESCE($4, due_date), \
                 updated_at = NOW() \
             WHERE id = $5 AND user_id = $6 \
             RETURNING {}",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(&update.title)
            .bind(&update.description)
            .bind(update.completed)
            .bind(update.due_date)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "DELETE FROM tasks WHERE id = $1 AND user_id = $2 RETURNING {}",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_all_by_owner(&self, owner_id: i32) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?)
    }
}
