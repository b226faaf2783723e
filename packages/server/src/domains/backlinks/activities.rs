use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use crate::common::BacklinkId;
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::backlinks::data::{
    BacklinkCheckData, CreateBacklinkRequest, UpdateBacklinkRequest,
};
use crate::domains::backlinks::models::{
    Backlink, BacklinkStatus, CreateBacklink, UpdateBacklink,
};
use crate::kernel::ServerDeps;

pub async fn create_backlink(
    input: CreateBacklinkRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Backlink> {
    let backlink = Backlink::create(
        CreateBacklink {
            source_url: input.source_url,
            target_url: input.target_url,
            anchor_text: input.anchor_text,
            kind: input.kind.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            site_id: input.site_id,
            domain_authority: input.domain_authority,
            page_authority: input.page_authority,
        },
        &deps.db_pool,
    )
    .await?;

    log_activity(
        ctx,
        "backlink_created",
        json!({ "backlink_id": backlink.id, "source_url": backlink.source_url }),
        &deps.db_pool,
    )
    .await;
    Ok(backlink)
}

pub async fn update_backlink(
    id: BacklinkId,
    input: UpdateBacklinkRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Option<Backlink>> {
    let update = UpdateBacklink {
        source_url: input.source_url,
        target_url: input.target_url,
        anchor_text: input.anchor_text,
        kind: input.kind,
        status: input.status,
        site_id: input.site_id,
        domain_authority: input.domain_authority,
        page_authority: input.page_authority,
    };

    let backlink = Backlink::update(id, update, &deps.db_pool).await?;
    if backlink.is_some() {
        log_activity(ctx, "backlink_updated", json!({ "backlink_id": id }), &deps.db_pool).await;
    }
    Ok(backlink)
}

pub async fn delete_backlink(
    id: BacklinkId,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<bool> {
    let deleted = Backlink::delete(id, &deps.db_pool).await?;
    if deleted {
        log_activity(ctx, "backlink_deleted", json!({ "backlink_id": id }), &deps.db_pool).await;
    }
    Ok(deleted)
}

/// Probe the linking page and mark the backlink active or broken
pub async fn check_backlink(backlink: &Backlink, deps: &ServerDeps) -> Result<BacklinkCheckData> {
    let is_active = deps.liveness.check_url(&backlink.source_url).await;
    let status = BacklinkStatus::from_probe(is_active);
    let checked_at = Utc::now();

    Backlink::record_check(backlink.id, status, checked_at, &deps.db_pool).await?;

    Ok(BacklinkCheckData {
        success: true,
        status,
        is_active,
        checked_at,
    })
}

/// Daily sweep over every backlink that is not marked removed.
/// Returns how many came back broken.
pub async fn run_backlink_sweep(deps: &ServerDeps) -> Result<usize> {
    let backlinks = Backlink::find_for_recheck(&deps.db_pool).await?;
    let mut broken = 0;

    for backlink in &backlinks {
        match check_backlink(backlink, deps).await {
            Ok(check) if !check.is_active => broken += 1,
            Ok(_) => {}
            Err(e) => error!(backlink_id = %backlink.id, error = %e, "Backlink check failed"),
        }
    }

    info!(checked = backlinks.len(), broken, "Backlink sweep finished");
    Ok(broken)
}
