//! Keyword and ranking mutations

use anyhow::Result;
use serde_json::json;

use crate::common::{SeoKeywordId, SeoRankingId};
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::seo::models::{KeywordInput, RankingInput, SeoKeyword, SeoRanking};
use crate::kernel::ServerDeps;

pub async fn create_keyword(
    keyword: &str,
    input: KeywordInput,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<SeoKeyword> {
    let row = SeoKeyword::create(keyword, input, &deps.db_pool).await?;
    log_activity(
        ctx,
        "seo_keyword_created",
        json!({ "keyword_id": row.id, "keyword": row.keyword }),
        &deps.db_pool,
    )
    .await;
    Ok(row)
}

pub async fn update_keyword(
    id: SeoKeywordId,
    input: KeywordInput,
    deps: &ServerDeps,
) -> Result<Option<SeoKeyword>> {
    SeoKeyword::update(id, input, &deps.db_pool).await
}

pub async fn delete_keyword(id: SeoKeywordId, deps: &ServerDeps) -> Result<bool> {
    SeoKeyword::delete(id, &deps.db_pool).await
}

pub async fn create_ranking(
    keyword: &str,
    input: RankingInput,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<SeoRanking> {
    let row = SeoRanking::create(keyword, input, &deps.db_pool).await?;
    log_activity(
        ctx,
        "seo_ranking_created",
        json!({ "ranking_id": row.id, "keyword": row.keyword }),
        &deps.db_pool,
    )
    .await;
    Ok(row)
}

pub async fn update_ranking(
    id: SeoRankingId,
    input: RankingInput,
    deps: &ServerDeps,
) -> Result<Option<SeoRanking>> {
    SeoRanking::update(id, input, &deps.db_pool).await
}

pub async fn delete_ranking(id: SeoRankingId, deps: &ServerDeps) -> Result<bool> {
    SeoRanking::delete(id, &deps.db_pool).await
}
