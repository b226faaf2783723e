use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{BacklinkId, Permission};
use crate::domains::backlinks::activities::{
    check_backlink, create_backlink, delete_backlink, update_backlink,
};
use crate::domains::backlinks::data::{
    BacklinkCheckData, BacklinkFilter, CreateBacklinkRequest, UpdateBacklinkRequest,
};
use crate::domains::backlinks::models::{Backlink, BacklinkWithSite};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId, ValidJson};

pub async fn list_backlinks_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(filter): Query<BacklinkFilter>,
) -> ApiResult<Json<Vec<BacklinkWithSite>>> {
    actor.require(Permission::ManageSeo)?;
    Ok(Json(Backlink::list_with_site(filter.status, &state.db_pool).await?))
}

pub async fn create_backlink_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<CreateBacklinkRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageSeo)?;
    let ValidJson(req) = body?;

    let backlink = create_backlink(req, &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": backlink.id })),
    ))
}

pub async fn update_backlink_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<BacklinkId>,
    body: Result<ValidJson<UpdateBacklinkRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSeo)?;
    let ValidJson(req) = body?;

    update_backlink(id, req, &actor.ctx, &state.server_deps)
        .await?
        .ok_or(ApiError::NotFound("backlink_not_found"))?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_backlink_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<BacklinkId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageSeo)?;
    if !delete_backlink(id, &actor.ctx, &state.server_deps).await? {
        return Err(ApiError::WriteFailed("delete_failed"));
    }
    Ok(Json(json!({ "success": true })))
}

/// `POST /backlinks/{id}/check`
pub async fn check_backlink_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<BacklinkId>,
) -> ApiResult<Json<BacklinkCheckData>> {
    actor.require(Permission::ManageSeo)?;
    let backlink = Backlink::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("backlink_not_found"))?;
    Ok(Json(check_backlink(&backlink, &state.server_deps).await?))
}
