use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::common::TaskId;
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::tasks::data::{CreateTaskRequest, UpdateTaskRequest};
use crate::domains::tasks::models::{CreateTask, Task, UpdateTask};
use crate::kernel::ServerDeps;

pub async fn create_task(
    input: CreateTaskRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Task> {
    let task = Task::create(
        CreateTask {
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            assigned_to: input.assigned_to,
            project: input.project,
            due_date: input.due_date,
        },
        &deps.db_pool,
    )
    .await?;

    info!(task_id = %task.id, "Task created");
    log_activity(
        ctx,
        "task_created",
        json!({ "task_id": task.id, "title": task.title }),
        &deps.db_pool,
    )
    .await;
    Ok(task)
}

pub async fn update_task(
    id: TaskId,
    input: UpdateTaskRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Option<Task>> {
    let update = UpdateTask {
        title: input.title,
        description: input.description,
        status: input.status,
        priority: input.priority,
        assigned_to: input.assigned_to,
        project: input.project,
        due_date: input.due_date,
    };

    let task = Task::update(id, update, &deps.db_pool).await?;
    if let Some(task) = &task {
        log_activity(
            ctx,
            "task_updated",
            json!({ "task_id": task.id, "status": task.status }),
            &deps.db_pool,
        )
        .await;
    }
    Ok(task)
}

pub async fn delete_task(id: TaskId, ctx: &ActivityContext, deps: &ServerDeps) -> Result<bool> {
    let deleted = Task::delete(id, &deps.db_pool).await?;
    if deleted {
        log_activity(ctx, "task_deleted", json!({ "task_id": id }), &deps.db_pool).await;
    }
    Ok(deleted)
}
