use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AutomationWebhookId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AutomationWebhook {
    pub id: AutomationWebhookId,
    pub name: String,
    pub webhook_url: String,
    pub trigger: String,
    pub is_active: bool,
    pub last_execution: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AutomationWebhook {
    pub async fn create(
        name: &str,
        webhook_url: &str,
        trigger: &str,
        is_active: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let webhook = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO automation_webhooks (id, name, webhook_url, trigger, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(AutomationWebhookId::new())
        .bind(name)
        .bind(webhook_url)
        .bind(trigger)
        .bind(is_active)
        .fetch_one(pool)
        .await?;
        Ok(webhook)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let webhooks = sqlx::query_as::<_, Self>(
            "SELECT * FROM automation_webhooks ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(webhooks)
    }

    pub async fn delete(id: AutomationWebhookId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM automation_webhooks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
