//!
//! # Persistence seams
//!
//! The handlers talk to storage through the `UserStore` and `TaskStore`
//! traits rather than a concrete database, so the authentication and
//! ownership logic can be exercised against the in-memory implementation in
//! tests while production runs on Postgres.
//!
//! Every task lookup or mutation is keyed jointly on `(id, owner)`: a task
//! that exists but belongs to another owner is indistinguishable from one
//! that does not exist at all.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskUpdate, User};

pub use memory::{MemTaskStore, MemUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user record. Fails with `DuplicateEmail` on a unique-email
    /// violation so a lost race against a concurrent registration still maps
    /// to the right domain error.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Sets `verified = true`. Idempotent; returns the updated user or `None`
    /// if no such user exists.
    async fn mark_verified(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Removes a user, returning the deleted record if one existed. Used for
    /// the registration rollback when the verification email cannot be sent.
    async fn delete_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, task: Task) -> Result<Task, AppError>;

    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: i32)
        -> Result<Option<Task>, AppError>;

    /// Applies a partial update as a single atomic, owner-filtered mutation.
    /// `None` means no task matched the `(id, owner)` pair.
    async fn update_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
        update: TaskUpdate,
    ) -> Result<Option<Task>, AppError>;

    async fn delete_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
    ) -> Result<Option<Task>, AppError>;

    async fn find_all_by_owner(&self, owner_id: i32) -> Result<Vec<Task>, AppError>;
}
