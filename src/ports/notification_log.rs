//! Notification log port.
//!
//! Records which members have been emailed so the inactivity sweep does
//! not spam the same person every run.

use async_trait::async_trait;

use crate::domain::DomainError;

/// Port for the append-only notification log.
#[async_trait]
pub trait NotificationLog: Send + Sync {
    /// Whether a notification of this kind went out within the last
    /// `days` days.
    async fn was_notified_within(
        &self,
        user_id: i64,
        kind: &str,
        days: i64,
    ) -> Result<bool, DomainError>;

    async fn record(&self, user_id: i64, kind: &str) -> Result<(), DomainError>;
}
