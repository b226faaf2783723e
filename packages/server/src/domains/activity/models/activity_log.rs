use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ActivityLogId, UserId};

/// Who did something and from where. Anonymous for failed logins and cron jobs.
#[derive(Debug, Clone, Default)]
pub struct ActivityContext {
    pub user_id: Option<UserId>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ActivityContext {
    pub fn system() -> Self {
        Self::default()
    }
}

/// Append-only audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub user_id: Option<UserId>,
    pub action: String,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entry joined with the acting user's name for the activity screen
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityLogWithUser {
    pub id: ActivityLogId,
    pub user_id: Option<UserId>,
    pub username: Option<String>,
    pub action: String,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub async fn record(
        ctx: &ActivityContext,
        action: &str,
        details: serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self> {
        let entry = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO activity_log (id, user_id, action, details, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ActivityLogId::new())
        .bind(ctx.user_id)
        .bind(action)
        .bind(details)
        .bind(&ctx.ip_address)
        .bind(&ctx.user_agent)
        .fetch_one(pool)
        .await?;
        Ok(entry)
    }

    /// Newest first, optionally narrowed to one action
    pub async fn list_recent(
        action: Option<&str>,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<ActivityLogWithUser>> {
        let entries = sqlx::query_as::<_, ActivityLogWithUser>(
            r#"
            SELECT a.id, a.user_id, u.username, a.action, a.details,
                   a.ip_address, a.user_agent, a.created_at
            FROM activity_log a
            LEFT JOIN users u ON u.id = a.user_id
            WHERE ($1::text IS NULL OR a.action = $1)
            ORDER BY a.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(action)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }

    pub async fn find_by_action(action: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let entries = sqlx::query_as::<_, Self>(
            "SELECT * FROM activity_log WHERE action = $1 ORDER BY created_at DESC",
        )
        .bind(action)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }

    /// Retention sweep
    pub async fn delete_older_than(days: i32, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM activity_log WHERE created_at < NOW() - make_interval(days => $1)",
        )
        .bind(days)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
