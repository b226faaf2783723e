//! Dashboard domain - headline counters for the landing page

use anyhow::Result;
use serde::Serialize;

use crate::common::UserId;
use crate::domains::activity::Notification;
use crate::domains::leads::Lead;
use crate::domains::sites::Site;
use crate::domains::tasks::Task;
use crate::kernel::ServerDeps;

/// Window for the "new leads" counter
pub const NEW_LEAD_WINDOW_DAYS: i32 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_sites: i64,
    pub total_leads: i64,
    pub new_leads: i64,
    pub active_tasks: i64,
    pub sites_down: i64,
    pub unread_notifications: i64,
}

pub async fn dashboard_stats(user_id: UserId, deps: &ServerDeps) -> Result<DashboardStats> {
    let pool = &deps.db_pool;
    let (total_sites, total_leads, new_leads, active_tasks, sites_down, unread_notifications) =
        tokio::try_join!(
            Site::count_live(pool),
            Lead::count_all(pool),
            Lead::count_new_since(NEW_LEAD_WINDOW_DAYS, pool),
            Task::count_active(pool),
            Site::count_down(pool),
            Notification::count_unread(user_id, pool),
        )?;

    Ok(DashboardStats {
        total_sites,
        total_leads,
        new_leads,
        active_tasks,
        sites_down,
        unread_notifications,
    })
}
