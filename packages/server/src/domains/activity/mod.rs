//! Activity domain - append-only audit trail and per-user notifications

pub mod activities;
pub mod models;

pub use activities::log_activity;
pub use models::{ActivityContext, ActivityLog, Notification, NotificationKind};
