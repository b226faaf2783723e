//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! ```text
//! every 5 minutes   └─► run_uptime_sweep()    probe active sites, alert on down
//! daily 02:30       └─► run_backlink_sweep()  re-check non-removed backlinks
//! daily 03:00       └─► run_cleanup()         prune activity, notifications, sessions
//! ```

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::activity::{ActivityLog, Notification};
use crate::domains::auth::models::Session;
use crate::domains::backlinks::activities::run_backlink_sweep;
use crate::domains::sites::activities::run_uptime_sweep;
use crate::kernel::ServerDeps;

pub const UPTIME_SCHEDULE: &str = "0 */5 * * * *";
pub const BACKLINK_SCHEDULE: &str = "0 30 2 * * *";
pub const CLEANUP_SCHEDULE: &str = "0 0 3 * * *";

pub const ACTIVITY_RETENTION_DAYS: i32 = 90;
pub const READ_NOTIFICATION_RETENTION_DAYS: i32 = 30;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: ServerDeps) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let uptime_deps = deps.clone();
    let uptime_job = Job::new_async(UPTIME_SCHEDULE, move |_uuid, _lock| {
        let deps = uptime_deps.clone();
        Box::pin(async move {
            if let Err(e) = run_uptime_sweep(&deps).await {
                tracing::error!("Uptime sweep failed: {}", e);
            }
        })
    })?;
    scheduler.add(uptime_job).await?;

    let backlink_deps = deps.clone();
    let backlink_job = Job::new_async(BACKLINK_SCHEDULE, move |_uuid, _lock| {
        let deps = backlink_deps.clone();
        Box::pin(async move {
            if let Err(e) = run_backlink_sweep(&deps).await {
                tracing::error!("Backlink sweep failed: {}", e);
            }
        })
    })?;
    scheduler.add(backlink_job).await?;

    let cleanup_deps = deps;
    let cleanup_job = Job::new_async(CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let deps = cleanup_deps.clone();
        Box::pin(async move {
            if let Err(e) = run_cleanup(&deps).await {
                tracing::error!("Cleanup task failed: {}", e);
            }
        })
    })?;
    scheduler.add(cleanup_job).await?;

    scheduler.start().await?;

    tracing::info!(
        uptime = UPTIME_SCHEDULE,
        backlinks = BACKLINK_SCHEDULE,
        cleanup = CLEANUP_SCHEDULE,
        "Scheduled tasks started"
    );
    Ok(scheduler)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    pub activity_entries: u64,
    pub notifications: u64,
    pub sessions: u64,
}

/// Prune old activity, read notifications and expired sessions
pub async fn run_cleanup(deps: &ServerDeps) -> Result<CleanupSummary> {
    tracing::info!("Running cleanup task");
    let pool = &deps.db_pool;

    let summary = CleanupSummary {
        activity_entries: ActivityLog::delete_older_than(ACTIVITY_RETENTION_DAYS, pool).await?,
        notifications: Notification::delete_read_older_than(READ_NOTIFICATION_RETENTION_DAYS, pool)
            .await?,
        sessions: Session::delete_expired(pool).await?,
    };

    tracing::info!(
        activity_entries = summary.activity_entries,
        notifications = summary.notifications,
        sessions = summary.sessions,
        "Cleanup complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schedules_parse() {
        for expr in [UPTIME_SCHEDULE, BACKLINK_SCHEDULE, CLEANUP_SCHEDULE] {
            let job = Job::new_async(expr, |_uuid, _lock| Box::pin(async {}));
            assert!(job.is_ok(), "{}", expr);
        }
    }
}
