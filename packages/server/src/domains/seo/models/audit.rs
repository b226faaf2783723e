use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{SeoAuditId, SiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "audit_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeoAudit {
    pub id: SeoAuditId,
    pub site_id: SiteId,
    pub status: AuditStatus,
    pub results: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeoAuditWithSite {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: SeoAudit,
    pub site_name: Option<String>,
}

impl SeoAudit {
    pub async fn start(site_id: SiteId, pool: &PgPool) -> Result<Self> {
        let audit = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO seo_audits (id, site_id, status)
            VALUES ($1, $2, 'running')
            RETURNING *
            "#,
        )
        .bind(SeoAuditId::new())
        .bind(site_id)
        .fetch_one(pool)
        .await?;
        Ok(audit)
    }

    /// Store the outcome and stamp `completed_at`
    pub async fn finish(
        id: SeoAuditId,
        status: AuditStatus,
        results: serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self> {
        let audit = sqlx::query_as::<_, Self>(
            r#"
            UPDATE seo_audits SET status = $2, results = $3, completed_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(results)
        .fetch_one(pool)
        .await?;
        Ok(audit)
    }

    pub async fn list_with_site(pool: &PgPool) -> Result<Vec<SeoAuditWithSite>> {
        let audits = sqlx::query_as::<_, SeoAuditWithSite>(
            r#"
            SELECT a.*, s.name AS site_name
            FROM seo_audits a
            LEFT JOIN sites s ON s.id = a.site_id
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(audits)
    }

    pub async fn delete(id: SeoAuditId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM seo_audits WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
