use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

// Every handler here runs behind AuthMiddleware, and every store call is
// filtered jointly on (task id, owner id). A task that exists but belongs to
// another user gets the same 404 as one that never existed.

const NOT_FOUND: &str = "Task not found or not authorized";

/// Retrieves all tasks owned by the authenticated user.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.find_all_by_owner(user.id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The owner is always the authenticated identity; `TaskInput` has no owner
/// field, so owner-like keys in the payload are dropped at deserialization.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.id);
    let created = state.tasks.create(task).await?;

    Ok(HttpResponse::Created().json(created))
}

/// Retrieves a specific task by its ID, if the authenticated user owns it.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .find_by_id_and_owner(task_id.into_inner(), user.id)
        .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(NOT_FOUND.into())),
    }
}

/// Applies a partial update to a task the authenticated user owns.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    if task_data.is_empty() {
        return Err(AppError::Validation(
            "You must provide at least one field to update the task".into(),
        ));
    }

    let updated = state
        .tasks
        .update_by_id_and_owner(task_id.into_inner(), user.id, task_data.into_inner())
        .await?;

    match updated {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(NOT_FOUND.into())),
    }
}

/// Deletes a task the authenticated user owns.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let deleted = state
        .tasks
        .delete_by_id_and_owner(task_id.into_inner(), user.id)
        .await?;

    match deleted {
        Some(_) => Ok(HttpResponse::NoContent().finish()),
        None => Err(AppError::NotFound(NOT_FOUND.into())),
    }
}
