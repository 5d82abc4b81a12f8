//! Payment configuration (PayMongo)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// PayMongo gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// PayMongo secret API key
    pub paymongo_secret_key: Secret<String>,

    /// PayMongo webhook signing secret
    pub paymongo_webhook_secret: Secret<String>,

    /// PayMongo API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Redirect URL after successful checkout
    #[serde(default = "default_success_url")]
    pub success_redirect_url: String,

    /// Redirect URL after failed checkout
    #[serde(default = "default_failed_url")]
    pub failed_redirect_url: String,
}

impl PaymentConfig {
    /// Check if using PayMongo test mode
    pub fn is_test_mode(&self) -> bool {
        self.paymongo_secret_key
            .expose_secret()
            .starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.paymongo_secret_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMONGO_SECRET_KEY"));
        }
        if !key.starts_with("sk_test_") && !key.starts_with("sk_live_") {
            return Err(ValidationError::InvalidPayMongoKey);
        }
        if self.paymongo_webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMONGO_WEBHOOK_SECRET"));
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            paymongo_secret_key: Secret::new(String::new()),
            paymongo_webhook_secret: Secret::new(String::new()),
            base_url: default_base_url(),
            success_redirect_url: default_success_url(),
            failed_redirect_url: default_failed_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.paymongo.com/v1".to_string()
}

fn default_success_url() -> String {
    "http://localhost:5173/payment/success".to_string()
}

fn default_failed_url() -> String {
    "http://localhost:5173/payment/failed".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PaymentConfig {
        PaymentConfig {
            paymongo_secret_key: Secret::new("sk_test_abc123".to_string()),
            paymongo_webhook_secret: Secret::new("whsk_xyz".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_key_rejected() {
        assert!(PaymentConfig::default().validate().is_err());
    }

    #[test]
    fn bad_key_prefix_rejected() {
        let config = PaymentConfig {
            paymongo_secret_key: Secret::new("pk_test_abc".to_string()),
            ..test_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPayMongoKey)
        ));
    }

    #[test]
    fn missing_webhook_secret_rejected() {
        let config = PaymentConfig {
            paymongo_webhook_secret: Secret::new(String::new()),
            ..test_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mode_detected() {
        assert!(test_config().is_test_mode());
    }

    #[test]
    fn valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }
}
