use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::integrations::data::{
    has_config, merge_with_defaults, webhook_target, IntegrationState, IntegrationTestResult,
};
use crate::domains::integrations::models::{Integration, IntegrationStatus};
use crate::kernel::ServerDeps;

pub async fn list_integrations(deps: &ServerDeps) -> Result<BTreeMap<String, IntegrationState>> {
    let stored = Integration::list(&deps.db_pool).await?;
    Ok(merge_with_defaults(stored))
}

pub async fn save_integration(
    kind: &str,
    config: Value,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Integration> {
    let config = if config.is_null() { json!({}) } else { config };
    let row =
        Integration::upsert(kind, IntegrationStatus::Connected, &config, &deps.db_pool).await?;

    info!(integration = kind, "Integration connected");
    log_activity(
        ctx,
        "integration_connected",
        json!({ "type": kind }),
        &deps.db_pool,
    )
    .await;
    Ok(row)
}

pub async fn disconnect_integration(
    kind: &str,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<()> {
    if Integration::reset(kind, &deps.db_pool).await? {
        info!(integration = kind, "Integration disconnected");
        log_activity(
            ctx,
            "integration_disconnected",
            json!({ "type": kind }),
            &deps.db_pool,
        )
        .await;
    }
    Ok(())
}

/// Check a config without saving it. An empty request config falls back to
/// the stored one. Webhook targets are probed for reachability.
pub async fn test_integration(
    kind: &str,
    config: Value,
    deps: &ServerDeps,
) -> Result<IntegrationTestResult> {
    let config = if has_config(&config) {
        config
    } else {
        Integration::find(kind, &deps.db_pool)
            .await?
            .map(|row| row.config)
            .unwrap_or(Value::Null)
    };

    if !has_config(&config) {
        return Ok(IntegrationTestResult {
            success: false,
            message: format!("No configuration provided for {}", kind),
        });
    }

    if let Some(url) = webhook_target(&config) {
        let reachable = deps.liveness.check_url(url).await;
        return Ok(IntegrationTestResult {
            success: reachable,
            message: if reachable {
                format!("Webhook {} is reachable", url)
            } else {
                format!("Webhook {} did not respond", url)
            },
        });
    }

    Ok(IntegrationTestResult {
        success: true,
        message: format!("Configuration for {} is present", kind),
    })
}
