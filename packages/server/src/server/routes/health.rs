use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::server::app::AxumAppState;
use crate::MIGRATOR;

const PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    /// Database answers but runs an older schema than this build expects
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub schema_version: Option<i64>,
    pub expected_schema_version: Option<i64>,
    pub pool_size: u32,
    pub pool_idle: usize,
}

/// `GET /health`
///
/// Reads the newest applied migration, which doubles as the connectivity
/// check. 200 when reachable, 503 when the query fails or times out.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthReport>) {
    let applied = tokio::time::timeout(
        PING_TIMEOUT,
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
        )
        .fetch_one(&state.db_pool),
    )
    .await
    .map_err(|_| format!("query timed out after {}s", PING_TIMEOUT.as_secs()))
    .and_then(|result| result.map_err(|e| e.to_string()));

    let expected = MIGRATOR.iter().map(|m| m.version).max();
    let (code, mut report) = assess(applied, expected);
    report.pool_size = state.db_pool.size();
    report.pool_idle = state.db_pool.num_idle();
    (code, Json(report))
}

fn assess(
    applied: Result<Option<i64>, String>,
    expected: Option<i64>,
) -> (StatusCode, HealthReport) {
    let mut report = HealthReport {
        status: HealthStatus::Healthy,
        database: "ok",
        error: None,
        schema_version: None,
        expected_schema_version: expected,
        pool_size: 0,
        pool_idle: 0,
    };

    match applied {
        Ok(version) => {
            report.schema_version = version;
            if version < expected {
                report.status = HealthStatus::Degraded;
            }
            (StatusCode::OK, report)
        }
        Err(error) => {
            tracing::warn!(%error, "Health check could not reach the database");
            report.status = HealthStatus::Unhealthy;
            report.database = "error";
            report.error = Some(error);
            (StatusCode::SERVICE_UNAVAILABLE, report)
        }
    }
}
