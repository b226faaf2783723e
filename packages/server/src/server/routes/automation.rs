use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::common::{AutomationRuleId, AutomationWebhookId, Permission};
use crate::domains::automation::activities::{
    create_rule, create_webhook, delete_rule, delete_webhook,
};
use crate::domains::automation::data::{CreateRuleRequest, CreateWebhookRequest};
use crate::domains::automation::{AutomationRule, AutomationWebhook};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId, ValidJson};

pub async fn list_rules_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<Vec<AutomationRule>>> {
    actor.require(Permission::ManageAutomation)?;
    Ok(Json(AutomationRule::list(&state.db_pool).await?))
}

pub async fn create_rule_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<CreateRuleRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageAutomation)?;
    let ValidJson(req) = body?;

    let rule = create_rule(req, &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": rule.id })),
    ))
}

pub async fn delete_rule_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<AutomationRuleId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageAutomation)?;
    if !delete_rule(id, &actor.ctx, &state.server_deps).await? {
        return Err(ApiError::WriteFailed("delete_failed"));
    }
    Ok(Json(json!({ "success": true })))
}

pub async fn list_webhooks_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<Vec<AutomationWebhook>>> {
    actor.require(Permission::ManageAutomation)?;
    Ok(Json(AutomationWebhook::list(&state.db_pool).await?))
}

pub async fn create_webhook_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<CreateWebhookRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageAutomation)?;
    let ValidJson(req) = body?;

    let webhook = create_webhook(req, &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": webhook.id })),
    ))
}

pub async fn delete_webhook_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<AutomationWebhookId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageAutomation)?;
    if !delete_webhook(id, &actor.ctx, &state.server_deps).await? {
        return Err(ApiError::WriteFailed("delete_failed"));
    }
    Ok(Json(json!({ "success": true })))
}
