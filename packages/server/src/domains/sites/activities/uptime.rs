//! Uptime probing for sites, on demand and from the five-minute sweep.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::domains::activity::{Notification, NotificationKind};
use crate::domains::auth::models::User;
use crate::domains::sites::models::{Site, UptimeStatus};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
pub struct UptimeCheck {
    pub status: UptimeStatus,
    pub is_up: bool,
    pub checked_at: DateTime<Utc>,
    pub alerted: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepSummary {
    pub checked: usize,
    pub up: usize,
    pub down: usize,
    pub alerts: usize,
}

/// Alert only on the transition into `down`, and only if the site opted in.
pub fn should_alert(previous: UptimeStatus, is_up: bool, alerts_enabled: bool) -> bool {
    !is_up && previous != UptimeStatus::Down && alerts_enabled
}

/// Probe one site, store the result and alert admins if it just went down.
pub async fn check_site(site: &Site, deps: &ServerDeps) -> Result<UptimeCheck> {
    let is_up = deps.liveness.check_url(&site.primary_url).await;
    let status = UptimeStatus::from_probe(is_up);
    let checked_at = Utc::now();

    Site::record_uptime(site.id, status, checked_at, &deps.db_pool).await?;

    let alerted = should_alert(site.uptime_status, is_up, site.uptime_alerts);
    if alerted {
        send_downtime_alert(site, checked_at, deps).await?;
    }

    Ok(UptimeCheck {
        status,
        is_up,
        checked_at,
        alerted,
    })
}

/// Probe every active site. One failing site never stops the sweep.
pub async fn run_uptime_sweep(deps: &ServerDeps) -> Result<SweepSummary> {
    let sites = Site::find_for_uptime_sweep(&deps.db_pool).await?;
    let mut summary = SweepSummary::default();

    for site in &sites {
        match check_site(site, deps).await {
            Ok(check) => {
                summary.checked += 1;
                if check.is_up {
                    summary.up += 1;
                } else {
                    summary.down += 1;
                }
                if check.alerted {
                    summary.alerts += 1;
                }
            }
            Err(e) => {
                error!(site_id = %site.id, error = %e, "Uptime check failed");
            }
        }
    }

    info!(
        checked = summary.checked,
        up = summary.up,
        down = summary.down,
        alerts = summary.alerts,
        "Uptime sweep finished"
    );
    Ok(summary)
}

/// One notification and one email per active admin
async fn send_downtime_alert(site: &Site, at: DateTime<Utc>, deps: &ServerDeps) -> Result<()> {
    let admins = User::find_active_admins(&deps.db_pool).await?;
    warn!(site_id = %site.id, admins = admins.len(), "Site went down, alerting admins");

    let title = "Site down";
    let message = format!("The site {} ({}) is down.", site.name, site.primary_url);
    let html = downtime_email(site, at);

    for admin in &admins {
        Notification::create(admin.id, title, &message, NotificationKind::Error, &deps.db_pool)
            .await?;

        if let Err(e) = deps.mailer.send_html(&admin.email, title, &html).await {
            error!(user_id = %admin.id, error = %e, "Failed to send downtime email");
        }
    }

    Ok(())
}

fn downtime_email(site: &Site, at: DateTime<Utc>) -> String {
    format!(
        "<h2>Downtime alert</h2>\
         <p>The site <strong>{}</strong> is down.</p>\
         <p><strong>URL:</strong> {}</p>\
         <p><strong>Time:</strong> {}</p>\
         <p>Please check the site as soon as possible.</p>",
        html_escape(&site.name),
        html_escape(&site.primary_url),
        at.format("%d/%m/%Y %H:%M:%S UTC"),
    )
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
