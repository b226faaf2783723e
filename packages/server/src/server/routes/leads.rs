use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{LeadId, Permission};
use crate::domains::leads::activities::{create_lead, delete_lead, update_lead};
use crate::domains::leads::data::{CreateLeadRequest, LeadFilter, UpdateLeadRequest};
use crate::domains::leads::models::{Lead, LeadWithAssignee};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId, ValidJson};

pub async fn list_leads_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(filter): Query<LeadFilter>,
) -> ApiResult<Json<Vec<LeadWithAssignee>>> {
    actor.require(Permission::ViewLeads)?;
    Ok(Json(
        Lead::list_with_assignee(filter.status, &state.db_pool).await?,
    ))
}

pub async fn create_lead_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<CreateLeadRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageLeads)?;
    let ValidJson(req) = body?;

    let lead = create_lead(req, &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": lead.id })),
    ))
}

pub async fn update_lead_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<LeadId>,
    body: Result<ValidJson<UpdateLeadRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageLeads)?;
    let ValidJson(req) = body?;

    update_lead(id, req, &actor.ctx, &state.server_deps)
        .await?
        .ok_or(ApiError::NotFound("lead_not_found"))?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_lead_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<LeadId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageLeads)?;
    if !delete_lead(id, &actor.ctx, &state.server_deps).await? {
        return Err(ApiError::WriteFailed("delete_failed"));
    }
    Ok(Json(json!({ "success": true })))
}
