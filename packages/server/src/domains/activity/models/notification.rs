use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{NotificationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub async fn create(
        user_id: UserId,
        title: &str,
        message: &str,
        kind: NotificationKind,
        pool: &PgPool,
    ) -> Result<Self> {
        let notification = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO notifications (id, user_id, title, message, type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(NotificationId::new())
        .bind(user_id)
        .bind(title)
        .bind(message)
        .bind(kind)
        .fetch_one(pool)
        .await?;
        Ok(notification)
    }

    pub async fn find_for_user(user_id: UserId, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let notifications = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(notifications)
    }

    /// Only the owner can mark their notification; returns false otherwise
    pub async fn mark_read(id: NotificationId, user_id: UserId, pool: &PgPool) -> Result<bool> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_unread(user_id: UserId, pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    pub async fn delete_read_older_than(days: i32, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE is_read = TRUE AND created_at < NOW() - make_interval(days => $1)
            "#,
        )
        .bind(days)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
