use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "integration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IntegrationStatus {
    Connected,
    #[default]
    Disconnected,
    Inactive,
}

/// Stored state of one third-party integration, keyed by its type name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Integration {
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub status: IntegrationStatus,
    pub config: Value,
    pub updated_at: DateTime<Utc>,
}

impl Integration {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>("SELECT * FROM integrations ORDER BY type")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(kind: &str, pool: &PgPool) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, Self>("SELECT * FROM integrations WHERE type = $1")
            .bind(kind)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn upsert(
        kind: &str,
        status: IntegrationStatus,
        config: &Value,
        pool: &PgPool,
    ) -> Result<Self> {
        let row = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO integrations (type, status, config, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (type) DO UPDATE SET
                status = EXCLUDED.status,
                config = EXCLUDED.config,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(kind)
        .bind(status)
        .bind(config)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Back to disconnected with an empty config. Unknown types are a no-op.
    pub async fn reset(kind: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE integrations
            SET status = 'disconnected', config = '{}'::jsonb, updated_at = NOW()
            WHERE type = $1
            "#,
        )
        .bind(kind)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
