//! First-party JWT issuing and verification.
//!
//! Tokens in this trust domain are self-contained: the subject id, email,
//! role, and verification flag are embedded at signing time, so verification
//! needs no provider round trip. Signing uses a server-held secret (HS256)
//! and every token carries the platform issuer and audience claims, which
//! are validated on every verification.

use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;

/// Claims embedded in first-party access tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject claim).
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub iss: String,
    pub aud: String,
    /// Expiration timestamp (Unix seconds).
    pub exp: usize,
    /// Issued-at timestamp (Unix seconds).
    pub iat: usize,
}

/// Claims embedded in refresh tokens.
///
/// Refresh tokens are long-lived and only good for obtaining a new access
/// token. They carry no role or verification state; both are re-read from
/// the user record at refresh time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    /// Unique token identifier.
    pub jti: String,
}

/// Why a presented first-party token was not accepted.
///
/// The split matters for client messaging: an expired token means
/// "refresh or log in again", an invalid one means the credential is
/// malformed or tampered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

fn validation_for(jwt_config: &JwtConfig) -> Validation {
    let mut validation = Validation::default();
    validation.set_issuer(&[&jwt_config.issuer]);
    validation.set_audience(&[&jwt_config.audience]);
    validation
}

pub fn create_access_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.access_token_expiry;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
        is_verified: user.is_verified,
        iss: jwt_config.issuer.clone(),
        aud: jwt_config.audience.clone(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation_for(jwt_config),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

pub fn create_refresh_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.refresh_token_expiry;

    let claims = RefreshClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        iss: jwt_config.issuer.clone(),
        aud: jwt_config.audience.clone(),
        exp: exp as usize,
        iat: now as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create refresh token: {}", e)))
}

pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshClaims, TokenError> {
    decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation_for(jwt_config),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
            issuer: "upe-platform".to_string(),
            audience: "upe-users".to_string(),
        }
    }

    fn test_user() -> User {
        User {
            id: "local-user-1".to_string(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            picture: None,
            role: UserRole::Estudiante,
            is_verified: true,
            password_hash: None,
            bio: None,
            company_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let config = test_jwt_config();
        let user = test_user();

        let token = create_access_token(&user, &config).unwrap();
        let claims = verify_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "local-user-1");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::Estudiante);
        assert!(claims.is_verified);
        assert_eq!(claims.iss, "upe-platform");
        assert_eq!(claims.aud, "upe-users");
    }

    #[test]
    fn test_expired_token_is_expired_not_invalid() {
        let mut config = test_jwt_config();
        config.access_token_expiry = -3600;

        let token = create_access_token(&test_user(), &config).unwrap();
        assert_eq!(verify_access_token(&token, &config), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let config = test_jwt_config();
        let mut token = create_access_token(&test_user(), &config).unwrap();
        // Corrupt the signature segment.
        token.pop();
        token.push('A');

        assert_eq!(verify_access_token(&token, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let config = test_jwt_config();
        let token = create_access_token(&test_user(), &config).unwrap();

        let mut other = test_jwt_config();
        other.secret = "a-completely-different-secret-key-here".to_string();

        assert_eq!(verify_access_token(&token, &other), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_audience_is_invalid() {
        let config = test_jwt_config();
        let token = create_access_token(&test_user(), &config).unwrap();

        let mut other = test_jwt_config();
        other.audience = "another-audience".to_string();

        assert_eq!(verify_access_token(&token, &other), Err(TokenError::Invalid));
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let config = test_jwt_config();
        let token = create_refresh_token(&test_user(), &config).unwrap();
        let claims = verify_refresh_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "local-user-1");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let config = test_jwt_config();
        let refresh = create_refresh_token(&test_user(), &config).unwrap();

        // Refresh claims lack the role/verification fields of access claims.
        assert_eq!(
            verify_access_token(&refresh, &config),
            Err(TokenError::Invalid)
        );
    }
}
