use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;
use crate::domains::auth::models::UserRole;

/// Login session keyed by the token's `jti`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: UserId,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub async fn create(
        jti: &str,
        user_id: UserId,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
        expires_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let session = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sessions (id, user_id, ip_address, user_agent, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(jti)
        .bind(user_id)
        .bind(ip_address)
        .bind(user_agent)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;
        Ok(session)
    }

    /// Current role of the token's user while the session is unexpired and
    /// the account active; `None` after logout, expiry or deactivation.
    pub async fn live_role(jti: &str, user_id: UserId, pool: &PgPool) -> Result<Option<UserRole>> {
        let role = sqlx::query_scalar::<_, UserRole>(
            r#"
            SELECT u.role
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = $1
              AND s.user_id = $2
              AND s.expires_at > NOW()
              AND u.status = 'active'
            "#,
        )
        .bind(jti)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(role)
    }

    pub async fn delete(jti: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(jti)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_expired(pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
