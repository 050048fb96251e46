/// Task endpoints
///
/// All routes require an API key. The caller only ever sees their own
/// tasks; another user's task id answers exactly like an unknown one.
///
/// # Endpoints
///
/// - `POST   /tasks` - Create a task
/// - `GET    /tasks` - List the caller's tasks
/// - `GET    /tasks/:task_id` - Fetch one task
/// - `PUT    /tasks/:task_id` - Replace text and status
/// - `DELETE /tasks/:task_id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    params::{RequestParams, ResourceId},
    response::{ApiResponse, MessageBody},
};
use axum::{extract::State, Extension};
use chrono::{DateTime, Utc};
use serde::Serialize;
use todoquote_shared::{auth::middleware::AuthContext, models::task::Task};

/// Task as returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub task: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            task: task.task,
            status: task.status,
            created_at: task.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskCreatedResponse {
    pub message: String,
    pub task_id: i64,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
}

/// Create a task
///
/// Required field: `task`. Answers 201 with the new id.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    params: RequestParams,
) -> ApiResult<ApiResponse<TaskCreatedResponse>> {
    let [text] = params.require(["task"])?;

    let task = Task::create(&state.db, auth.user_id, &text).await?;
    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");

    Ok(ApiResponse::created(TaskCreatedResponse {
        message: "Task created successfully".to_string(),
        task_id: task.id,
    }))
}

/// List the caller's tasks, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<TaskListResponse>> {
    let tasks = Task::list_by_user(&state.db, auth.user_id).await?;

    Ok(ApiResponse::ok(TaskListResponse {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    }))
}

/// Fetch one task
///
/// 404 with the shared not-found message when absent or foreign.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ResourceId(task_id): ResourceId,
) -> ApiResult<ApiResponse<TaskResponse>> {
    let task = Task::find_by_id_and_user(&state.db, task_id, auth.user_id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(ApiResponse::ok(TaskResponse::from(task)))
}

/// Replace text and status of a task
///
/// Required fields: `task`, `status` (integer).
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ResourceId(task_id): ResourceId,
    params: RequestParams,
) -> ApiResult<ApiResponse<MessageBody>> {
    let [text, status] = params.require(["task", "status"])?;
    let status = parse_status(&status)?;

    if !Task::update(&state.db, auth.user_id, task_id, &text, status).await? {
        return Err(ApiError::NotFound(
            "Task failed to update. Please try again!".to_string(),
        ));
    }

    tracing::info!(user_id = auth.user_id, task_id, status, "Task updated");
    Ok(ApiResponse::ok(MessageBody::new("Task updated successfully")))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ResourceId(task_id): ResourceId,
) -> ApiResult<ApiResponse<MessageBody>> {
    if !Task::delete(&state.db, auth.user_id, task_id).await? {
        return Err(ApiError::NotFound(
            "Task failed to delete. Please try again!".to_string(),
        ));
    }

    tracing::info!(user_id = auth.user_id, task_id, "Task deleted");
    Ok(ApiResponse::ok(MessageBody::new("Task deleted successfully")))
}

fn parse_status(raw: &str) -> ApiResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest("Field status must be an integer".to_string()))
}
