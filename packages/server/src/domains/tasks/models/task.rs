use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{TaskId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Option<UserId>,
    pub project: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithAssignee {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,
    pub assigned_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Option<UserId>,
    pub project: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub project: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub async fn create(input: CreateTask, pool: &PgPool) -> Result<Self> {
        let task = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO tasks (
                id, title, description, status, priority, assigned_to, project, due_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(TaskId::new())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(input.priority)
        .bind(input.assigned_to)
        .bind(&input.project)
        .bind(input.due_date)
        .fetch_one(pool)
        .await?;
        Ok(task)
    }

    pub async fn find_by_id(id: TaskId, pool: &PgPool) -> Result<Option<Self>> {
        let task = sqlx::query_as::<_, Self>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(task)
    }

    pub async fn list_with_assignee(
        status: Option<TaskStatus>,
        assigned_to: Option<UserId>,
        pool: &PgPool,
    ) -> Result<Vec<TaskWithAssignee>> {
        let tasks = sqlx::query_as::<_, TaskWithAssignee>(
            r#"
            SELECT t.*, u.username AS assigned_name
            FROM tasks t
            LEFT JOIN users u ON u.id = t.assigned_to
            WHERE ($1::task_status IS NULL OR t.status = $1)
              AND ($2::uuid IS NULL OR t.assigned_to = $2)
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(status)
        .bind(assigned_to)
        .fetch_all(pool)
        .await?;
        Ok(tasks)
    }

    pub async fn update(id: TaskId, input: UpdateTask, pool: &PgPool) -> Result<Option<Self>> {
        let task = sqlx::query_as::<_, Self>(
            r#"
            UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                assigned_to = COALESCE($6, assigned_to),
                project = COALESCE($7, project),
                due_date = COALESCE($8, due_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(input.priority)
        .bind(input.assigned_to)
        .bind(&input.project)
        .bind(input.due_date)
        .fetch_optional(pool)
        .await?;
        Ok(task)
    }

    pub async fn delete(id: TaskId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Tasks still open (`todo` or `in_progress`)
    pub async fn count_active(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE status IN ('todo', 'in_progress')",
        )
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
