//! Authentication configuration (JWT)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens
    pub jwt_secret: Secret<String>,

    /// Token lifetime in hours
    #[serde(default = "default_token_lifetime_hours")]
    pub token_lifetime_hours: u64,
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_lifetime_hours == 0 || self.token_lifetime_hours > 168 {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            token_lifetime_hours: default_token_lifetime_hours(),
        }
    }
}

fn default_token_lifetime_hours() -> u64 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_rejected() {
        assert!(AuthConfig::default().validate().is_err());
    }

    #[test]
    fn short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: Secret::new("too-short".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort)
        ));
    }

    #[test]
    fn valid_config_passes() {
        let config = AuthConfig {
            jwt_secret: Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            token_lifetime_hours: 24,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_lifetime_rejected() {
        let config = AuthConfig {
            jwt_secret: Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            token_lifetime_hours: 0,
        };
        assert!(config.validate().is_err());
    }
}
