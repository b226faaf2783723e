use axum::{extract::Extension, Json};

use crate::common::Permission;
use crate::domains::dashboard::{dashboard_stats, DashboardStats};
use crate::server::app::AxumAppState;
use crate::server::error::ApiResult;
use crate::server::extract::Actor;

/// `GET /dashboard/stats`
pub async fn dashboard_stats_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<DashboardStats>> {
    actor.require(Permission::ViewDashboard)?;
    Ok(Json(
        dashboard_stats(actor.user.user_id, &state.server_deps).await?,
    ))
}
