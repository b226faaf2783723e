//! Request extractors shared by the REST handlers.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::USER_AGENT, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use validator::{Validate, ValidationErrors};

use crate::common::sanitize::Sanitize;
use crate::common::Permission;
use crate::domains::activity::ActivityContext;
use crate::domains::auth::models::Session;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::{AuthUser, ClientIp};

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(client_ip(parts))
    }
}

fn client_ip(parts: &Parts) -> ClientIp {
    parts
        .extensions
        .get::<ClientIp>()
        .copied()
        .unwrap_or(ClientIp::UNKNOWN)
}

/// Where a request came from; used for anonymous audit entries
#[derive(Debug, Clone)]
pub struct RequestOrigin {
    pub ip: ClientIp,
    pub ctx: ActivityContext,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestOrigin::from_parts(parts))
    }
}

impl RequestOrigin {
    fn from_parts(parts: &Parts) -> Self {
        let ip = client_ip(parts);
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            ip,
            ctx: ActivityContext {
                user_id: None,
                ip_address: (ip != ClientIp::UNKNOWN).then(|| ip.0.to_string()),
                user_agent,
            },
        }
    }
}

/// The authenticated caller plus the context their actions are logged with.
///
/// Rejects with 401 when the JWT middleware found no valid token, or when the
/// token's session was logged out, expired or belongs to a deactivated user.
/// The role is reloaded from the user row.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user: AuthUser,
    pub ctx: ActivityContext,
}

impl Actor {
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        self.user.require(permission).map_err(ApiError::from)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut user = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)?;

        let state = parts
            .extensions
            .get::<AxumAppState>()
            .ok_or_else(|| anyhow::anyhow!("application state missing from request"))?;
        user.role = Session::live_role(&user.jti, user.user_id, &state.db_pool)
            .await?
            .ok_or(ApiError::Unauthenticated)?;

        let origin = RequestOrigin::from_parts(parts);
        let ctx = ActivityContext {
            user_id: Some(user.user_id),
            ..origin.ctx
        };
        Ok(Self { user, ctx })
    }
}

/// Path parameter whose parse failure renders as a JSON 400
#[derive(Debug, Clone, Copy)]
pub struct PathId<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(PathId(value))
    }
}

/// JSON body that is sanitized and validated before the handler sees it.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Sanitize,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.sanitize();
        value
            .validate()
            .map_err(|errors| ApiError::Validation(describe(&errors)))?;
        Ok(ValidJson(value))
    }
}

/// One sentence per failing field, sorted by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            errs.first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field))
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(url)]
        url: String,
    }

    #[test]
    fn describes_each_failing_field() {
        let probe = Probe {
            name: String::new(),
            url: "nope".into(),
        };
        let message = describe(&probe.validate().unwrap_err());
        assert_eq!(message, "name is required; url is invalid");
    }
}
