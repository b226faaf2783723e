use crate::common::{AuthError, Permission, UserId};
use crate::domains::auth::{JwtService, UserRole};
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
    /// Token id, also the key of the session row
    pub jti: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require(&self, permission: Permission) -> Result<(), AuthError> {
        if self.role.can(permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(permission))
        }
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser
/// to request extensions.
/// If no token or invalid token, request continues without AuthUser; handlers decide.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!("Authenticated user: {} (role: {:?})", user.user_id, user.role);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: UserId::from_uuid(claims.user_id),
        username: claims.username,
        role: claims.role,
        jti: claims.jti,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn service() -> JwtService {
        JwtService::new("test_secret", "test_issuer".to_string())
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = service();
        let user_id = Uuid::new_v4();
        let issued = jwt_service
            .create_token(user_id, "ana", UserRole::Admin)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", issued.token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.user_id, UserId::from_uuid(user_id));
        assert_eq!(auth_user.jti, issued.jti);
        assert!(auth_user.is_admin());
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = service();
        let issued = jwt_service
            .create_token(Uuid::new_v4(), "bia", UserRole::Collaborator)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", issued.token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.username, "bia");
        assert!(auth_user.require(Permission::ManageLeads).is_ok());
        assert!(auth_user.require(Permission::ManageSites).is_err());
    }

    #[test]
    fn test_no_auth_header() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(extract_auth_user(&request, &service()).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(extract_auth_user(&request, &service()).is_none());
    }
}
