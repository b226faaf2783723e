//! API error type rendered as `{"code", "message", "data": {"status"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid username or password")]
    LoginFailed,

    #[error("{0}")]
    Forbidden(String),

    /// Carries the resource-specific code, e.g. `site_not_found`
    #[error("Resource not found")]
    NotFound(&'static str),

    #[error("Too many failed login attempts. Try again in 15 minutes.")]
    TooManyAttempts,

    /// A write that should have touched a row did not
    #[error("The operation could not be completed")]
    WriteFailed(&'static str),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated | ApiError::LoginFailed => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            ApiError::WriteFailed(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "invalid_request",
            ApiError::Validation(_) => "missing_required_fields",
            ApiError::Unauthenticated => "unauthorized",
            ApiError::LoginFailed => "login_failed",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(code) | ApiError::WriteFailed(code) => code,
            ApiError::TooManyAttempts => "too_many_attempts",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn missing(field: &str) -> Self {
        ApiError::Validation(format!("{} is required", field))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationRequired | AuthError::InvalidToken => {
                ApiError::Unauthenticated
            }
            AuthError::PermissionDenied(_) => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(e) = &self {
            tracing::error!(error = ?e, "Request failed");
        }

        let body = json!({
            "code": self.code(),
            "message": self.to_string(),
            "data": { "status": status.as_u16() },
        });
        (status, Json(body)).into_response()
    }
}
