//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// OpenAI configuration for the meal planner.
///
/// The AI integration is optional: when no API key is configured the
/// meal planner runs entirely on the deterministic rotation.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key (optional; fallback planner used when absent)
    pub openai_api_key: Option<String>,

    /// Chat model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AiConfig {
    /// Whether an API key is configured at all
    pub fn is_enabled(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .map(|k| !k.is_empty())
            .unwrap_or(false)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.openai_api_key {
            if !key.is_empty() && !key.starts_with("sk-") {
                return Err(ValidationError::InvalidOpenAiKey);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

// Meal generation must stay interactive; give up quickly and fall back.
fn default_timeout() -> u64 {
    12
}

fn default_max_tokens() -> u32 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_key() {
        let config = AiConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_key_counts_as_disabled() {
        let config = AiConfig {
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_key_prefix_rejected() {
        let config = AiConfig {
            openai_api_key: Some("re_not_openai".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_timeout_is_short() {
        let config = AiConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(12));
    }
}
