//! JWT token service (HS256).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::{AuthError, CurrentUser, Role};
use crate::ports::TokenService;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Member id.
    sub: i64,
    role: String,
    exp: i64,
}

/// Token service signing with a shared HMAC secret.
pub struct JwtTokenService {
    secret: Secret<String>,
    lifetime_hours: i64,
}

impl JwtTokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            lifetime_hours: config.token_lifetime_hours as i64,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &CurrentUser) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user.id,
            role: user.role.as_str().to_string(),
            exp: (Utc::now() + Duration::hours(self.lifetime_hours)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::IssueFailed(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        let role = Role::parse(&data.claims.role).map_err(|_| AuthError::InvalidToken)?;
        Ok(CurrentUser::new(data.claims.sub, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new(&AuthConfig {
            jwt_secret: Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            token_lifetime_hours: 24,
        })
    }

    #[test]
    fn issue_then_validate_roundtrip() {
        let svc = service();
        let user = CurrentUser::new(42, Role::Admin);
        let token = svc.issue(&user).unwrap();
        let validated = svc.validate(&token).unwrap();
        assert_eq!(validated, user);
    }

    #[test]
    fn garbage_token_rejected() {
        assert_eq!(
            service().validate("not.a.token"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn token_from_other_secret_rejected() {
        let other = JwtTokenService::new(&AuthConfig {
            jwt_secret: Secret::new("ffffffffffffffffffffffffffffffff".to_string()),
            token_lifetime_hours: 24,
        });
        let token = other.issue(&CurrentUser::new(1, Role::Member)).unwrap();
        assert_eq!(service().validate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_rejected() {
        let svc = JwtTokenService {
            secret: Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            lifetime_hours: -1,
        };
        let token = svc.issue(&CurrentUser::new(1, Role::Member)).unwrap();
        assert_eq!(service().validate(&token), Err(AuthError::TokenExpired));
    }
}
