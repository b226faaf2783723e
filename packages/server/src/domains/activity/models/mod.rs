pub mod activity_log;
pub mod notification;

pub use activity_log::{ActivityContext, ActivityLog, ActivityLogWithUser};
pub use notification::{Notification, NotificationKind};
