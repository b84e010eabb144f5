//! In-memory store implementations.
//!
//! Back the integration tests and local demos without a database. They mirror
//! the Postgres stores' observable behavior, including the unique-email
//! constraint and the joint `(id, owner)` filter on every task operation.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskUpdate, User};
use crate::store::{TaskStore, UserStore};

pub struct MemUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl Default for MemUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    /// Number of stored users; lets tests assert the registration rollback.
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(AppError::DuplicateEmail);
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            verified: false,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn mark_verified(&self, id: i32) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.verified = true;
            u.clone()
        }))
    }

    async fn delete_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();
        match users.iter().position(|u| u.id == id) {
            Some(index) => Ok(Some(users.remove(index))),
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct MemTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemTaskStore {
    async fn create(&self, task: Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.push(task.clone());
        Ok(task)
    }

    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
    ) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == owner_id)
            .cloned())
    }

    async fn update_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
        update: TaskUpdate,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner_id)
            .map(|t| {
                t.apply(update);
                t.clone()
            }))
    }

    async fn delete_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: i32,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter().position(|t| t.id == id && t.user_id == owner_id) {
            Some(index) => Ok(Some(tasks.remove(index))),
            None => Ok(None),
        }
    }

    async fn find_all_by_owner(&self, owner_id: i32) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.lock().unwrap();
        let mut owned: Vec<Task> = tasks
            .iter()
            .filter(|t| t.user_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
