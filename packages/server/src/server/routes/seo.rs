use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{Permission, SeoAuditId, SeoKeywordId, SeoRankingId, SiteId};
use crate::domains::seo::activities::{
    create_keyword, create_ranking, delete_keyword, delete_ranking, run_audit, update_keyword,
    update_ranking,
};
use crate::domains::seo::data::{KeywordRequest, RankingRequest, SeoFilter};
use crate::domains::seo::models::{SeoAudit, SeoAuditWithSite, SeoKeyword, SeoRanking};
use crate::domains::sites::models::Site;
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId, ValidJson};

fn deleted(ok: bool) -> ApiResult<Json<Value>> {
    if ok {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::WriteFailed("delete_failed"))
    }
}

// Keywords

pub async fn list_keywords_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(filter): Query<SeoFilter>,
) -> ApiResult<Json<Vec<SeoKeyword>>> {
    actor.require(Permission::ManageSeo)?;
    Ok(Json(SeoKeyword::list(filter.site_id, &state.db_pool).await?))
}

pub async fn create_keyword_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<KeywordRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageSeo)?;
    let ValidJson(req) = body?;
    let keyword = req.keyword.clone().ok_or_else(|| ApiError::missing("keyword"))?;

    let row = create_keyword(&keyword, req.into(), &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": row.id })),
    ))
}

pub async fn update_keyword_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SeoKeywordId>,
    body: Result<ValidJson<KeywordRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSeo)?;
    let ValidJson(req) = body?;

    update_keyword(id, req.into(), &state.server_deps)
        .await?
        .ok_or(ApiError::NotFound("keyword_not_found"))?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_keyword_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SeoKeywordId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSeo)?;
    deleted(delete_keyword(id, &state.server_deps).await?)
}

// Rankings

pub async fn list_rankings_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(filter): Query<SeoFilter>,
) -> ApiResult<Json<Vec<SeoRanking>>> {
    actor.require(Permission::ManageSeo)?;
    Ok(Json(SeoRanking::list(filter.site_id, &state.db_pool).await?))
}

pub async fn create_ranking_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<RankingRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageSeo)?;
    let ValidJson(req) = body?;
    let keyword = req.keyword.clone().ok_or_else(|| ApiError::missing("keyword"))?;

    let row = create_ranking(&keyword, req.into(), &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": row.id })),
    ))
}

pub async fn update_ranking_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SeoRankingId>,
    body: Result<ValidJson<RankingRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSeo)?;
    let ValidJson(req) = body?;

    update_ranking(id, req.into(), &state.server_deps)
        .await?
        .ok_or(ApiError::NotFound("ranking_not_found"))?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_ranking_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SeoRankingId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSeo)?;
    deleted(delete_ranking(id, &state.server_deps).await?)
}

// Audits

pub async fn list_audits_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<Vec<SeoAuditWithSite>>> {
    actor.require(Permission::ManageSeo)?;
    Ok(Json(SeoAudit::list_with_site(&state.db_pool).await?))
}

pub async fn delete_audit_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SeoAuditId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSeo)?;
    deleted(SeoAudit::delete(id, &state.db_pool).await?)
}

/// `POST /seo/audit/{site_id}`
pub async fn run_audit_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(site_id): PathId<SiteId>,
) -> ApiResult<Json<SeoAudit>> {
    actor.require(Permission::ManageSeo)?;
    let site = Site::find_by_id(site_id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("site_not_found"))?;
    Ok(Json(run_audit(&site, &actor.ctx, &state.server_deps).await?))
}
