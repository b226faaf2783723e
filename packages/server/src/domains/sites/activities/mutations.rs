//! Site mutations. Credentials are encrypted here, before they reach the model.

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::common::{CredentialCodec, SiteId};
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::sites::data::{CreateSiteRequest, UpdateSiteRequest};
use crate::domains::sites::models::{CreateSite, Site, UpdateSite};
use crate::kernel::ServerDeps;

fn encrypt(codec: &CredentialCodec, value: Option<&serde_json::Value>) -> Result<Option<String>> {
    match value {
        Some(value) => Ok(codec.encrypt_value(value)?),
        None => Ok(None),
    }
}

/// Like `encrypt`, but a supplied blank value becomes `Some("")` so the
/// update clears the stored credential.
fn encrypt_patch(
    codec: &CredentialCodec,
    value: Option<&serde_json::Value>,
) -> Result<Option<String>> {
    match value {
        Some(value) => Ok(Some(codec.encrypt_value(value)?.unwrap_or_default())),
        None => Ok(None),
    }
}

pub async fn create_site(
    input: CreateSiteRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Site> {
    let codec = &deps.codec;

    let create = CreateSite {
        ftp_credentials: encrypt(codec, input.ftp_credentials.as_ref())?,
        ssh_credentials: encrypt(codec, input.ssh_credentials.as_ref())?,
        db_credentials: encrypt(codec, input.db_credentials.as_ref())?,
        name: input.name,
        primary_url: input.primary_url,
        other_urls: input.other_urls,
        category: input.category,
        cms: input.cms,
        server: input.server,
        hosting_provider: input.hosting_provider,
        hosting_type: input.hosting_type.unwrap_or_default(),
        responsible_user_id: input.responsible_user_id,
        team_members: input.team_members,
        external_providers: input.external_providers,
        google_analytics_id: input.google_analytics_id,
        search_console_url: input.search_console_url,
        tag_manager_id: input.tag_manager_id,
        facebook_pixel_id: input.facebook_pixel_id,
        webhook_urls: input.webhook_urls,
        main_keywords: input.main_keywords,
        backlinks_count: input.backlinks_count.unwrap_or(0),
        last_audit_date: input.last_audit_date,
        indexation_status: input.indexation_status.unwrap_or_default(),
        hosting_cost: input.hosting_cost.unwrap_or_default(),
        extra_costs: input.extra_costs.unwrap_or_default(),
        estimated_revenue: input.estimated_revenue.unwrap_or_default(),
        roi: input.roi.unwrap_or_default(),
        status: input.status.unwrap_or_default(),
        ssl_status: input.ssl_status.unwrap_or_default(),
        dns_status: input.dns_status.unwrap_or_default(),
        domain_expiry: input.domain_expiry,
        uptime_alerts: input.uptime_alerts.unwrap_or(true),
        internal_notes: input.internal_notes,
    };

    let site = Site::create(create, &deps.db_pool).await?;
    info!(site_id = %site.id, name = %site.name, "Site created");

    log_activity(
        ctx,
        "site_created",
        json!({ "site_id": site.id, "site_name": site.name }),
        &deps.db_pool,
    )
    .await;

    Ok(site)
}

/// Returns `None` when the site does not exist or was deleted
pub async fn update_site(
    id: SiteId,
    input: UpdateSiteRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Option<Site>> {
    let codec = &deps.codec;

    let update = UpdateSite {
        ftp_credentials: encrypt_patch(codec, input.ftp_credentials.as_ref())?,
        ssh_credentials: encrypt_patch(codec, input.ssh_credentials.as_ref())?,
        db_credentials: encrypt_patch(codec, input.db_credentials.as_ref())?,
        name: input.name,
        primary_url: input.primary_url,
        other_urls: input.other_urls,
        category: input.category,
        cms: input.cms,
        server: input.server,
        hosting_provider: input.hosting_provider,
        hosting_type: input.hosting_type,
        responsible_user_id: input.responsible_user_id,
        team_members: input.team_members,
        external_providers: input.external_providers,
        google_analytics_id: input.google_analytics_id,
        search_console_url: input.search_console_url,
        tag_manager_id: input.tag_manager_id,
        facebook_pixel_id: input.facebook_pixel_id,
        webhook_urls: input.webhook_urls,
        main_keywords: input.main_keywords,
        backlinks_count: input.backlinks_count,
        last_audit_date: input.last_audit_date,
        indexation_status: input.indexation_status,
        hosting_cost: input.hosting_cost,
        extra_costs: input.extra_costs,
        estimated_revenue: input.estimated_revenue,
        roi: input.roi,
        status: input.status,
        ssl_status: input.ssl_status,
        dns_status: input.dns_status,
        domain_expiry: input.domain_expiry,
        uptime_alerts: input.uptime_alerts,
        internal_notes: input.internal_notes,
    };

    let Some(site) = Site::update(id, update, &deps.db_pool).await? else {
        return Ok(None);
    };
    info!(site_id = %site.id, "Site updated");

    log_activity(
        ctx,
        "site_updated",
        json!({ "site_id": site.id, "site_name": site.name }),
        &deps.db_pool,
    )
    .await;

    Ok(Some(site))
}

/// Soft delete. False when nothing was marked.
pub async fn delete_site(id: SiteId, ctx: &ActivityContext, deps: &ServerDeps) -> Result<bool> {
    let deleted = Site::soft_delete(id, &deps.db_pool).await?;
    if deleted {
        info!(site_id = %id, "Site soft-deleted");
        log_activity(ctx, "site_deleted", json!({ "site_id": id }), &deps.db_pool).await;
    }
    Ok(deleted)
}
