use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{BacklinkId, SiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "backlink_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BacklinkType {
    Internal,
    #[default]
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "backlink_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BacklinkStatus {
    #[default]
    Active,
    Broken,
    Removed,
}

impl BacklinkStatus {
    pub fn from_probe(is_active: bool) -> Self {
        if is_active {
            BacklinkStatus::Active
        } else {
            BacklinkStatus::Broken
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Backlink {
    pub id: BacklinkId,
    pub source_url: String,
    pub target_url: String,
    pub anchor_text: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: BacklinkType,
    pub status: BacklinkStatus,
    pub site_id: Option<SiteId>,
    pub domain_authority: Option<i32>,
    pub page_authority: Option<i32>,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BacklinkWithSite {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub backlink: Backlink,
    pub site_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateBacklink {
    pub source_url: String,
    pub target_url: String,
    pub anchor_text: Option<String>,
    pub kind: BacklinkType,
    pub status: BacklinkStatus,
    pub site_id: Option<SiteId>,
    pub domain_authority: Option<i32>,
    pub page_authority: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBacklink {
    pub source_url: Option<String>,
    pub target_url: Option<String>,
    pub anchor_text: Option<String>,
    pub kind: Option<BacklinkType>,
    pub status: Option<BacklinkStatus>,
    pub site_id: Option<SiteId>,
    pub domain_authority: Option<i32>,
    pub page_authority: Option<i32>,
}

impl Backlink {
    pub async fn create(input: CreateBacklink, pool: &PgPool) -> Result<Self> {
        let backlink = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO backlinks (
                id, source_url, target_url, anchor_text, type, status, site_id,
                domain_authority, page_authority
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(BacklinkId::new())
        .bind(&input.source_url)
        .bind(&input.target_url)
        .bind(&input.anchor_text)
        .bind(input.kind)
        .bind(input.status)
        .bind(input.site_id)
        .bind(input.domain_authority)
        .bind(input.page_authority)
        .fetch_one(pool)
        .await?;
        Ok(backlink)
    }

    pub async fn find_by_id(id: BacklinkId, pool: &PgPool) -> Result<Option<Self>> {
        let backlink = sqlx::query_as::<_, Self>("SELECT * FROM backlinks WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(backlink)
    }

    pub async fn list_with_site(
        status: Option<BacklinkStatus>,
        pool: &PgPool,
    ) -> Result<Vec<BacklinkWithSite>> {
        let backlinks = sqlx::query_as::<_, BacklinkWithSite>(
            r#"
            SELECT b.*, s.name AS site_name
            FROM backlinks b
            LEFT JOIN sites s ON s.id = b.site_id
            WHERE ($1::backlink_status IS NULL OR b.status = $1)
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;
        Ok(backlinks)
    }

    pub async fn update(
        id: BacklinkId,
        input: UpdateBacklink,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let backlink = sqlx::query_as::<_, Self>(
            r#"
            UPDATE backlinks SET
                source_url = COALESCE($2, source_url),
                target_url = COALESCE($3, target_url),
                anchor_text = COALESCE($4, anchor_text),
                type = COALESCE($5, type),
                status = COALESCE($6, status),
                site_id = COALESCE($7, site_id),
                domain_authority = COALESCE($8, domain_authority),
                page_authority = COALESCE($9, page_authority),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.source_url)
        .bind(&input.target_url)
        .bind(&input.anchor_text)
        .bind(input.kind)
        .bind(input.status)
        .bind(input.site_id)
        .bind(input.domain_authority)
        .bind(input.page_authority)
        .fetch_optional(pool)
        .await?;
        Ok(backlink)
    }

    pub async fn delete(id: BacklinkId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM backlinks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Everything the daily sweep re-validates (removed links are left alone)
    pub async fn find_for_recheck(pool: &PgPool) -> Result<Vec<Self>> {
        let backlinks = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM backlinks
            WHERE status <> 'removed'
            ORDER BY last_checked ASC NULLS FIRST
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(backlinks)
    }

    pub async fn record_check(
        id: BacklinkId,
        status: BacklinkStatus,
        checked_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query("UPDATE backlinks SET status = $2, last_checked = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(checked_at)
            .execute(pool)
            .await?;
        Ok(())
    }
}
