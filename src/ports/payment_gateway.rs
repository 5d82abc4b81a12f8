//! Payment gateway port (hosted checkout + webhooks).

use async_trait::async_trait;

use crate::domain::DomainError;

/// Request to create a hosted checkout source.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Amount in centavos (the gateway does not take decimal pesos).
    pub amount_centavos: i64,
    pub description: String,
    pub success_url: String,
    pub failed_url: String,
}

/// A created checkout source.
#[derive(Debug, Clone)]
pub struct CheckoutSource {
    /// Gateway reference id; stored as our transaction id.
    pub source_id: String,
    /// Hosted checkout URL to redirect the member to.
    pub checkout_url: String,
}

/// Webhook event kinds we act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEventKind {
    PaymentPaid,
    SourceChargeable,
    PaymentFailed,
    Other(String),
}

/// A parsed webhook event.
#[derive(Debug, Clone)]
pub struct GatewayEvent {
    pub kind: GatewayEventKind,
    /// The source or payment id the event refers to.
    pub resource_id: Option<String>,
}

/// Port for the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_source(&self, request: &CheckoutRequest)
        -> Result<CheckoutSource, DomainError>;

    /// Verify the webhook signature header against the raw payload.
    /// Must be constant-time on the digest comparison.
    fn verify_signature(&self, payload: &[u8], signature_header: &str) -> bool;

    /// Parse the webhook payload into an event.
    fn parse_event(&self, payload: &[u8]) -> Result<GatewayEvent, DomainError>;
}
