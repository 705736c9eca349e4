use crate::{
    auth::AuthenticatedUser,
    error::{
        AppError, MSG_CREATE_FAILED, MSG_DELETE_FAILED, MSG_INVALID_ID, MSG_LIST_FAILED,
        MSG_TASK_DELETED, MSG_TASK_NOT_FOUND,
    },
    models::CreateTaskRequest,
    store::{StoreError, TaskStore},
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Lists every task.
///
/// The list is shared by all sessions and returned in creation order.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `403 Forbidden` / `401 Unauthorized`: rejected by the auth gate.
/// - `500 Internal Server Error`: the store failed.
#[get("/get")]
pub async fn list_tasks(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store.list().await.map_err(|e| {
        log::error!("listing tasks failed: {}", e);
        AppError::InternalServerError(MSG_LIST_FAILED.into())
    })?;
    log::debug!("{} listed {} tasks", user.0, tasks.len());

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task.
///
/// ## Request Body:
/// - `title`: required, non-empty. Other fields are ignored.
///
/// ## Responses:
/// - `201 Created`: the new `Task`, with `completed: false`.
/// - `400 Bad Request`: missing/empty title, bad JSON, or the store rejected the write.
/// - `403 Forbidden` / `401 Unauthorized`: rejected by the auth gate.
#[post("/post")]
pub async fn create_task(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let request = task_data.into_inner();
    if let Err(e) = request.validate() {
        log::warn!("rejected task body: {}", e);
        return Err(AppError::BadRequest(MSG_CREATE_FAILED.into()));
    }

    let title = request.title.unwrap_or_default();
    let task = store.create(title).await.map_err(|e| {
        log::warn!("task creation failed: {}", e);
        AppError::BadRequest(MSG_CREATE_FAILED.into())
    })?;
    log::info!("{} created task {}", user.0, task.id);

    Ok(HttpResponse::Created().json(task))
}

/// Toggles the completion state of a task.
///
/// ## Path Parameters:
/// - `id`: the task's UUID.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: no task with that id.
/// - `400 Bad Request`: the id is not a UUID, or the store failed.
/// - `403 Forbidden` / `401 Unauthorized`: rejected by the auth gate.
#[post("/{id}/complete")]
pub async fn complete_task(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    let task = store
        .toggle_complete(&task_id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(_) => AppError::NotFound(MSG_TASK_NOT_FOUND.into()),
            other => {
                log::warn!("toggling task {:?} failed: {}", task_id, other);
                AppError::BadRequest(MSG_INVALID_ID.into())
            }
        })?;
    log::info!("{} set task {} completed={}", user.0, task.id, task.completed);

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task permanently.
///
/// ## Path Parameters:
/// - `id`: the task's UUID.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Tarefa apagada com sucesso"}`.
/// - `404 Not Found`: no task with that id.
/// - `400 Bad Request`: the id is not a UUID, or the store failed.
/// - `403 Forbidden` / `401 Unauthorized`: rejected by the auth gate.
#[delete("/{id}/delete")]
pub async fn delete_task(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    store.delete(&task_id).await.map_err(|e| match e {
        StoreError::NotFound(_) => AppError::NotFound(MSG_TASK_NOT_FOUND.into()),
        other => {
            log::warn!("deleting task {:?} failed: {}", task_id, other);
            AppError::BadRequest(MSG_DELETE_FAILED.into())
        }
    })?;
    log::info!("{} deleted task {}", user.0, task_id);

    Ok(HttpResponse::Ok().json(json!({ "message": MSG_TASK_DELETED })))
}
