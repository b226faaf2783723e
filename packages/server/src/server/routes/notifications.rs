use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::common::{NotificationId, Permission};
use crate::domains::activity::models::ActivityLogWithUser;
use crate::domains::activity::{ActivityLog, Notification};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub action: Option<String>,
}

impl ListQuery {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread: i64,
}

/// `GET /notifications` - the caller's own, newest first
pub async fn list_notifications_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<NotificationList>> {
    let user_id = actor.user.user_id;
    let notifications = Notification::find_for_user(user_id, query.limit(), &state.db_pool).await?;
    let unread = Notification::count_unread(user_id, &state.db_pool).await?;
    Ok(Json(NotificationList {
        notifications,
        unread,
    }))
}

/// `POST /notifications/{id}/read`
pub async fn mark_notification_read_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<NotificationId>,
) -> ApiResult<Json<Value>> {
    if !Notification::mark_read(id, actor.user.user_id, &state.db_pool).await? {
        return Err(ApiError::NotFound("notification_not_found"));
    }
    Ok(Json(json!({ "success": true })))
}

/// `GET /activity?action=&limit=`
pub async fn list_activity_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ActivityLogWithUser>>> {
    actor.require(Permission::ViewActivity)?;
    let entries =
        ActivityLog::list_recent(query.action.as_deref(), query.limit(), &state.db_pool).await?;
    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(ListQuery::default().limit(), DEFAULT_LIMIT);
        let huge = ListQuery {
            limit: Some(10_000),
            action: None,
        };
        assert_eq!(huge.limit(), MAX_LIMIT);
        let negative = ListQuery {
            limit: Some(-3),
            action: None,
        };
        assert_eq!(negative.limit(), 1);
    }
}
