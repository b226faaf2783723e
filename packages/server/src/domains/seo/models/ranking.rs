use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{SeoRankingId, SiteId};

/// Search position tracking for one keyword
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeoRanking {
    pub id: SeoRankingId,
    pub keyword: String,
    pub target_url: Option<String>,
    pub site_id: Option<SiteId>,
    pub current_position: Option<i32>,
    pub previous_position: Option<i32>,
    pub target_position: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct RankingInput {
    pub keyword: Option<String>,
    pub target_url: Option<String>,
    pub site_id: Option<SiteId>,
    pub current_position: Option<i32>,
    pub target_position: Option<i32>,
}

impl SeoRanking {
    pub async fn create(keyword: &str, input: RankingInput, pool: &PgPool) -> Result<Self> {
        let row = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO seo_rankings (
                id, keyword, target_url, site_id, current_position, target_position
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(SeoRankingId::new())
        .bind(keyword)
        .bind(&input.target_url)
        .bind(input.site_id)
        .bind(input.current_position)
        .bind(input.target_position)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn list(site_id: Option<SiteId>, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM seo_rankings
            WHERE ($1::uuid IS NULL OR site_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(site_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// A new `current_position` shifts the old one into `previous_position`
    pub async fn update(
        id: SeoRankingId,
        input: RankingInput,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, Self>(
            r#"
            UPDATE seo_rankings SET
                keyword = COALESCE($2, keyword),
                target_url = COALESCE($3, target_url),
                site_id = COALESCE($4, site_id),
                previous_position = CASE
                    WHEN $5::int IS NOT NULL THEN current_position
                    ELSE previous_position
                END,
                current_position = COALESCE($5, current_position),
                target_position = COALESCE($6, target_position),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.keyword)
        .bind(&input.target_url)
        .bind(input.site_id)
        .bind(input.current_position)
        .bind(input.target_position)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(id: SeoRankingId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM seo_rankings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
