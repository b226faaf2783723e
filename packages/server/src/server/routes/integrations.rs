use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde_json::{json, Value};

use crate::common::Permission;
use crate::domains::integrations::activities::{
    disconnect_integration, list_integrations, save_integration, test_integration,
};
use crate::domains::integrations::data::{
    is_valid_kind, IntegrationConfigRequest, IntegrationState, IntegrationTestResult,
};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId};

fn checked_kind(kind: String) -> ApiResult<String> {
    if is_valid_kind(&kind) {
        Ok(kind)
    } else {
        Err(ApiError::BadRequest(format!("invalid integration type: {}", kind)))
    }
}

pub async fn list_integrations_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<BTreeMap<String, IntegrationState>>> {
    actor.require(Permission::ManageIntegrations)?;
    Ok(Json(list_integrations(&state.server_deps).await?))
}

/// `POST /integrations/{type}`
pub async fn save_integration_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(kind): PathId<String>,
    body: Result<Json<IntegrationConfigRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageIntegrations)?;
    let kind = checked_kind(kind)?;
    let Json(req) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    save_integration(&kind, req.config, &actor.ctx, &state.server_deps).await?;
    Ok(Json(json!({ "success": true })))
}

/// `DELETE /integrations/{type}`
pub async fn delete_integration_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(kind): PathId<String>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageIntegrations)?;
    let kind = checked_kind(kind)?;

    disconnect_integration(&kind, &actor.ctx, &state.server_deps).await?;
    Ok(Json(json!({ "success": true })))
}

/// `POST /integrations/{type}/test`; the body is optional
pub async fn test_integration_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(kind): PathId<String>,
    req: Option<Json<IntegrationConfigRequest>>,
) -> ApiResult<Json<IntegrationTestResult>> {
    actor.require(Permission::ManageIntegrations)?;
    let kind = checked_kind(kind)?;
    let config = req.map(|Json(r)| r.config).unwrap_or(Value::Null);

    Ok(Json(test_integration(&kind, config, &state.server_deps).await?))
}
