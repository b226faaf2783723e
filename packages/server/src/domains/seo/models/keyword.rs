use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{SeoKeywordId, SiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "keyword_difficulty", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KeywordDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeoKeyword {
    pub id: SeoKeywordId,
    pub keyword: String,
    pub target_url: Option<String>,
    pub site_id: Option<SiteId>,
    pub search_volume: i32,
    pub difficulty: KeywordDifficulty,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordInput {
    pub keyword: Option<String>,
    pub target_url: Option<String>,
    pub site_id: Option<SiteId>,
    pub search_volume: Option<i32>,
    pub difficulty: Option<KeywordDifficulty>,
}

impl SeoKeyword {
    pub async fn create(keyword: &str, input: KeywordInput, pool: &PgPool) -> Result<Self> {
        let row = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO seo_keywords (id, keyword, target_url, site_id, search_volume, difficulty)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(SeoKeywordId::new())
        .bind(keyword)
        .bind(&input.target_url)
        .bind(input.site_id)
        .bind(input.search_volume.unwrap_or(0))
        .bind(input.difficulty.unwrap_or_default())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn list(site_id: Option<SiteId>, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM seo_keywords
            WHERE ($1::uuid IS NULL OR site_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(site_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn update(
        id: SeoKeywordId,
        input: KeywordInput,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, Self>(
            r#"
            UPDATE seo_keywords SET
                keyword = COALESCE($2, keyword),
                target_url = COALESCE($3, target_url),
                site_id = COALESCE($4, site_id),
                search_volume = COALESCE($5, search_volume),
                difficulty = COALESCE($6, difficulty),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.keyword)
        .bind(&input.target_url)
        .bind(input.site_id)
        .bind(input.search_volume)
        .bind(input.difficulty)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(id: SeoKeywordId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM seo_keywords WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
