use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{TaskId, Permission};
use crate::domains::tasks::activities::{create_task, delete_task, update_task};
use crate::domains::tasks::data::{CreateTaskRequest, TaskFilter, UpdateTaskRequest};
use crate::domains::tasks::models::{Task, TaskWithAssignee};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId, ValidJson};

pub async fn list_tasks_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Vec<TaskWithAssignee>>> {
    actor.require(Permission::ViewTasks)?;
    Ok(Json(
        Task::list_with_assignee(filter.status, filter.assigned_to, &state.db_pool).await?,
    ))
}

pub async fn create_task_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<CreateTaskRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageTasks)?;
    let ValidJson(req) = body?;

    let task = create_task(req, &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": task.id })),
    ))
}

pub async fn update_task_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<TaskId>,
    body: Result<ValidJson<UpdateTaskRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageTasks)?;
    let ValidJson(req) = body?;

    update_task(id, req, &actor.ctx, &state.server_deps)
        .await?
        .ok_or(ApiError::NotFound("task_not_found"))?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_task_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<TaskId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageTasks)?;
    if !delete_task(id, &actor.ctx, &state.server_deps).await? {
        return Err(ApiError::WriteFailed("delete_failed"));
    }
    Ok(Json(json!({ "success": true })))
}
