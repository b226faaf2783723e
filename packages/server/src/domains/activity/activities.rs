use serde_json::Value;
use sqlx::PgPool;

use super::models::{ActivityContext, ActivityLog};

/// Append an audit entry. A failed write is logged and never fails the
/// mutation that triggered it.
pub async fn log_activity(ctx: &ActivityContext, action: &str, details: Value, pool: &PgPool) {
    if let Err(e) = ActivityLog::record(ctx, action, details, pool).await {
        tracing::error!(action, error = %e, "Failed to write activity log entry");
    }
}
