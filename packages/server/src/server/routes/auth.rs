use axum::{extract::Extension, Json};
use serde_json::{json, Value};

use crate::domains::auth::activities::{login, logout, LoginOutcome};
use crate::domains::auth::data::{LoginRequest, LoginResponse, UserData};
use crate::domains::auth::User;
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, RequestOrigin, ValidJson};

/// `POST /auth/login`
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    origin: RequestOrigin,
    body: Result<ValidJson<LoginRequest>, ApiError>,
) -> ApiResult<Json<LoginResponse>> {
    // A locked address gets 429 whatever it sends
    if state.login_throttle.is_locked(origin.ip.0) {
        return Err(ApiError::TooManyAttempts);
    }
    let ValidJson(req) = body?;

    let outcome = login(
        &req.username,
        &req.password,
        origin.ip.0,
        &origin.ctx,
        &state.jwt_service,
        &state.login_throttle,
        &state.server_deps,
    )
    .await?;

    match outcome {
        LoginOutcome::Success { user, token } => Ok(Json(LoginResponse {
            success: true,
            token: token.token,
            expires_at: token.expires_at,
            user: user.into(),
        })),
        LoginOutcome::Locked => Err(ApiError::TooManyAttempts),
        LoginOutcome::Failed => Err(ApiError::LoginFailed),
    }
}

/// `POST /auth/logout`
pub async fn logout_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<Value>> {
    logout(&actor.user.jti, &actor.ctx, &state.server_deps).await?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /auth/me`
pub async fn me_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
) -> ApiResult<Json<UserData>> {
    let user = User::find_by_id(actor.user.user_id, &state.db_pool)
        .await?
        .filter(|user| user.is_active())
        .ok_or(ApiError::Unauthenticated)?;
    Ok(Json(user.into()))
}
