//! Inactivity notification sweep configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the inactive-member reminder sweep.
///
/// The same threshold controls both who counts as inactive and how long
/// to wait before reminding the same member again.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Days without a check-in before a member counts as inactive
    #[serde(default = "default_inactive_threshold_days")]
    pub inactive_threshold_days: i64,

    /// Hours between sweep runs
    #[serde(default = "default_sweep_interval_hours")]
    pub sweep_interval_hours: u64,

    /// Whether the background sweep is enabled
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,
}

impl NotificationConfig {
    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inactive_threshold_days < 1 {
            return Err(ValidationError::InvalidInactivityThreshold);
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            inactive_threshold_days: default_inactive_threshold_days(),
            sweep_interval_hours: default_sweep_interval_hours(),
            sweep_enabled: default_sweep_enabled(),
        }
    }
}

fn default_inactive_threshold_days() -> i64 {
    3
}

fn default_sweep_interval_hours() -> u64 {
    24
}

fn default_sweep_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_rules() {
        let config = NotificationConfig::default();
        assert_eq!(config.inactive_threshold_days, 3);
        assert_eq!(config.sweep_interval_hours, 24);
        assert!(config.sweep_enabled);
    }

    #[test]
    fn zero_threshold_rejected() {
        let config = NotificationConfig {
            inactive_threshold_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
