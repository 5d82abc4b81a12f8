//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend HTTP API)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key (optional; email sending disabled when absent)
    pub resend_api_key: Option<String>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Whether a sender key is configured
    pub fn is_enabled(&self) -> bool {
        self.resend_api_key
            .as_ref()
            .map(|k| !k.is_empty())
            .unwrap_or(false)
    }

    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.resend_api_key {
            if !key.is_empty() && !key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@activecore.fit".to_string()
}

fn default_from_name() -> String {
    "ActiveCore Gym".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_key() {
        let config = EmailConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_header_formats_name_and_address() {
        let config = EmailConfig {
            from_email: "gym@example.com".to_string(),
            from_name: "Front Desk".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "Front Desk <gym@example.com>");
    }

    #[test]
    fn wrong_key_prefix_rejected() {
        let config = EmailConfig {
            resend_api_key: Some("sk_xxx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_from_email_rejected() {
        let config = EmailConfig {
            from_email: "not-an-email".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
