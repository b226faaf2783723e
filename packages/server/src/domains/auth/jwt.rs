use anyhow::Result;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::auth::models::UserRole;

/// Token lifetime; sessions recorded at login expire with the token
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,      // Subject (user_id as string)
    pub user_id: Uuid,
    pub username: String, // For logging
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub jti: String,      // Session key
}

/// A freshly signed token plus the bits the session row needs
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT Service - creates and verifies JWT tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Sign a token for a user. Expires after `TOKEN_TTL_HOURS`.
    pub fn create_token(
        &self,
        user_id: Uuid,
        username: &str,
        role: UserRole,
    ) -> Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(TOKEN_TTL_HOURS);
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            username: username.to_string(),
            role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: jti.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(IssuedToken {
            token,
            jti,
            expires_at,
        })
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        let user_id = Uuid::new_v4();

        let issued = service
            .create_token(user_id, "maria", UserRole::Collaborator)
            .unwrap();

        let claims = service.verify_token(&issued.token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.role, UserRole::Collaborator);
        assert_eq!(claims.iss, "test_issuer");
        assert_eq!(claims.jti, issued.jti);
    }

    #[test]
    fn test_invalid_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        assert!(service.verify_token("invalid_token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("secret1", "test_issuer".to_string());
        let service2 = JwtService::new("secret2", "test_issuer".to_string());

        let issued = service1
            .create_token(Uuid::new_v4(), "admin", UserRole::Admin)
            .unwrap();

        assert!(service2.verify_token(&issued.token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let service1 = JwtService::new("secret", "hub-a".to_string());
        let service2 = JwtService::new("secret", "hub-b".to_string());

        let issued = service1
            .create_token(Uuid::new_v4(), "admin", UserRole::Admin)
            .unwrap();

        assert!(service2.verify_token(&issued.token).is_err());
    }

    #[test]
    fn test_expiry_window() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        let issued = service
            .create_token(Uuid::new_v4(), "admin", UserRole::Admin)
            .unwrap();

        let claims = service.verify_token(&issued.token).unwrap();
        let expires_in = claims.exp - Utc::now().timestamp();
        assert!(expires_in > 23 * 3600);
        assert!(expires_in <= 24 * 3600);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }
}
