//! Outbound email port.

use async_trait::async_trait;

use crate::domain::DomainError;

/// Port for sending transactional email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DomainError>;
}
