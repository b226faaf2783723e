use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::common::{AutomationRuleId, AutomationWebhookId};
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::automation::data::{CreateRuleRequest, CreateWebhookRequest};
use crate::domains::automation::models::{AutomationRule, AutomationWebhook, CreateAutomationRule};
use crate::kernel::ServerDeps;

pub async fn create_rule(
    input: CreateRuleRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<AutomationRule> {
    let rule = AutomationRule::create(
        CreateAutomationRule {
            name: input.name,
            trigger: input.trigger,
            action: input.action,
            conditions: input.conditions,
            webhook_url: input.webhook_url,
            email_template: input.email_template,
            is_active: input.is_active,
        },
        &deps.db_pool,
    )
    .await?;

    info!(rule_id = %rule.id, trigger = %rule.trigger, "Automation rule created");
    log_activity(
        ctx,
        "automation_rule_created",
        json!({ "rule_id": rule.id, "name": rule.name }),
        &deps.db_pool,
    )
    .await;
    Ok(rule)
}

pub async fn delete_rule(
    id: AutomationRuleId,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<bool> {
    let deleted = AutomationRule::delete(id, &deps.db_pool).await?;
    if deleted {
        log_activity(ctx, "automation_rule_deleted", json!({ "rule_id": id }), &deps.db_pool)
            .await;
    }
    Ok(deleted)
}

pub async fn create_webhook(
    input: CreateWebhookRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<AutomationWebhook> {
    let webhook = AutomationWebhook::create(
        &input.name,
        &input.webhook_url,
        &input.trigger,
        input.is_active,
        &deps.db_pool,
    )
    .await?;

    info!(webhook_id = %webhook.id, trigger = %webhook.trigger, "Automation webhook created");
    log_activity(
        ctx,
        "automation_webhook_created",
        json!({ "webhook_id": webhook.id, "name": webhook.name }),
        &deps.db_pool,
    )
    .await;
    Ok(webhook)
}

pub async fn delete_webhook(
    id: AutomationWebhookId,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<bool> {
    let deleted = AutomationWebhook::delete(id, &deps.db_pool).await?;
    if deleted {
        log_activity(
            ctx,
            "automation_webhook_deleted",
            json!({ "webhook_id": id }),
            &deps.db_pool,
        )
        .await;
    }
    Ok(deleted)
}
