use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::common::{Permission, SiteId};
use crate::domains::sites::activities::{
    check_site, create_site, delete_site, get_site, list_sites, update_site,
};
use crate::domains::sites::data::UptimeCheckData;
use crate::domains::sites::models::Site;
use crate::domains::sites::{CreateSiteRequest, SiteData, UpdateSiteRequest};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId, ValidJson};

pub async fn list_sites_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<Vec<SiteData>>> {
    actor.require(Permission::ViewSites)?;
    Ok(Json(list_sites(&state.server_deps).await?))
}

pub async fn get_site_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SiteId>,
) -> ApiResult<Json<SiteData>> {
    actor.require(Permission::ViewSites)?;
    get_site(id, &state.server_deps)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("site_not_found"))
}

pub async fn create_site_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<CreateSiteRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageSites)?;
    let ValidJson(req) = body?;

    let site = create_site(req, &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": site.id })),
    ))
}

pub async fn update_site_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SiteId>,
    body: Result<ValidJson<UpdateSiteRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSites)?;
    let ValidJson(req) = body?;

    update_site(id, req, &actor.ctx, &state.server_deps)
        .await?
        .ok_or(ApiError::NotFound("site_not_found"))?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_site_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SiteId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSites)?;
    if !delete_site(id, &actor.ctx, &state.server_deps).await? {
        return Err(ApiError::WriteFailed("delete_failed"));
    }
    Ok(Json(json!({ "success": true })))
}

/// `POST /sites/{id}/check-uptime`
pub async fn check_uptime_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<SiteId>,
) -> ApiResult<Json<UptimeCheckData>> {
    actor.require(Permission::ManageSites)?;
    let site = Site::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("site_not_found"))?;

    let check = check_site(&site, &state.server_deps).await?;
    Ok(Json(UptimeCheckData {
        success: true,
        status: check.status,
        is_up: check.is_up,
        checked_at: check.checked_at,
    }))
}
