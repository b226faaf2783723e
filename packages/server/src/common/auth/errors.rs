use thiserror::Error;

use super::Permission;

/// Authorization errors raised before a handler touches any data
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Permission denied: {}", .0.as_str())]
    PermissionDenied(Permission),

    #[error("Invalid or expired token")]
    InvalidToken,
}
