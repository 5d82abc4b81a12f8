//! PayMongo API client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;

use crate::config::PaymentConfig;
use crate::domain::{DomainError, ErrorCode};
use crate::ports::{
    CheckoutRequest, CheckoutSource, GatewayEvent, GatewayEventKind, PaymentGateway,
};

use super::webhook::WebhookVerifier;

/// PayMongo gateway adapter: creates gcash checkout sources and
/// verifies/parses webhook deliveries.
pub struct PayMongoClient {
    client: reqwest::Client,
    secret_key: Secret<String>,
    base_url: String,
    verifier: WebhookVerifier,
}

impl PayMongoClient {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: config.paymongo_secret_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            verifier: WebhookVerifier::new(config.paymongo_webhook_secret.clone()),
        }
    }

    fn gateway_error(message: impl Into<String>) -> DomainError {
        DomainError::new(ErrorCode::PaymentGatewayError, message)
    }
}

#[async_trait]
impl PaymentGateway for PayMongoClient {
    async fn create_source(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSource, DomainError> {
        let body = serde_json::json!({
            "data": {
                "attributes": {
                    "amount": request.amount_centavos,
                    "currency": "PHP",
                    "type": "gcash",
                    "description": request.description,
                    "redirect": {
                        "success": request.success_url,
                        "failed": request.failed_url,
                    },
                }
            }
        });

        let response = self
            .client
            .post(format!("{}/sources", self.base_url))
            .basic_auth(self.secret_key.expose_secret(), Some(""))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::gateway_error(format!("Source creation failed: {}", e)))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| Self::gateway_error(format!("Unreadable gateway response: {}", e)))?;

        if !status.is_success() {
            tracing::error!(status = %status, "PayMongo rejected source creation");
            return Err(Self::gateway_error(format!(
                "Gateway returned HTTP {}",
                status
            )));
        }

        let source_id = payload["data"]["id"]
            .as_str()
            .ok_or_else(|| Self::gateway_error("Gateway response missing source id"))?
            .to_string();
        let checkout_url = payload["data"]["attributes"]["redirect"]["checkout_url"]
            .as_str()
            .ok_or_else(|| Self::gateway_error("Gateway response missing checkout URL"))?
            .to_string();

        Ok(CheckoutSource {
            source_id,
            checkout_url,
        })
    }

    fn verify_signature(&self, payload: &[u8], signature_header: &str) -> bool {
        self.verifier.verify(payload, signature_header)
    }

    fn parse_event(&self, payload: &[u8]) -> Result<GatewayEvent, DomainError> {
        parse_webhook_event(payload)
    }
}

/// Parse a webhook body into an event.
///
/// Shape: `data.attributes.type` names the event; the resource it refers
/// to sits under `data.attributes.data` — for payment events the source
/// id lives one level deeper under `attributes.source.id`.
pub fn parse_webhook_event(payload: &[u8]) -> Result<GatewayEvent, DomainError> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| DomainError::validation(format!("Unparseable webhook body: {}", e)))?;

    let attributes = &value["data"]["attributes"];
    let event_type = attributes["type"]
        .as_str()
        .ok_or_else(|| DomainError::validation("Webhook body missing event type"))?;

    let resource = &attributes["data"];
    let resource_id = resource["attributes"]["source"]["id"]
        .as_str()
        .or_else(|| resource["id"].as_str())
        .map(String::from);

    let kind = match event_type {
        "payment.paid" => GatewayEventKind::PaymentPaid,
        "source.chargeable" => GatewayEventKind::SourceChargeable,
        "payment.failed" => GatewayEventKind::PaymentFailed,
        other => GatewayEventKind::Other(other.to_string()),
    };

    Ok(GatewayEvent { kind, resource_id })
}
