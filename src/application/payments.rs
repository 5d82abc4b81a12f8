//! Payment flows: manual recording, gateway checkout, and webhook
//! reconciliation.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    DomainError, ErrorCode, MembershipType, PaymentState, SubscriptionWindow,
};
use crate::ports::{
    CheckoutRequest, CheckoutSource, NewPayment, PaymentGateway, PaymentRepository,
    GatewayEventKind, UserRepository,
};

/// Receipt returned after recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub payment_id: i64,
    pub transaction_id: String,
    pub window: SubscriptionWindow,
}

/// Outcome of a webhook delivery. Everything except `Processed` is a
/// deliberate no-op; the route returns 200 for all of them so the
/// gateway stops retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    Processed,
    InvalidSignature,
    UnknownPayment,
    Ignored,
}

/// Orchestrates the payment ledger and member subscription windows.
pub struct PaymentService {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            users,
            payments,
            gateway,
        }
    }

    fn generate_transaction_id(prefix: &str) -> String {
        let suffix: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(6)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), suffix)
    }

    /// Record an auto-approved payment (gcash in-app or cash at the
    /// front desk) and open a fresh subscription window.
    ///
    /// The ledger insert and the member update are two statements; a
    /// crash in between leaves a paid row without an updated window,
    /// which the next payment corrects.
    pub async fn record_paid_payment(
        &self,
        user_id: i64,
        membership_type: MembershipType,
        amount: f64,
        method: &str,
        notes: Option<String>,
    ) -> Result<PaymentReceipt, DomainError> {
        if amount <= 0.0 {
            return Err(DomainError::validation("Amount must be positive"));
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;

        let window = membership_type.subscription_window(Utc::now().date_naive());
        let transaction_id = Self::generate_transaction_id(&method.to_uppercase());

        let payment_id = self
            .payments
            .insert(&NewPayment {
                user_id,
                amount,
                method: method.to_string(),
                membership_type,
                state: PaymentState::Paid,
                transaction_id: Some(transaction_id.clone()),
                window: Some(window),
                notes,
            })
            .await?;

        self.users
            .activate_subscription(user_id, membership_type, amount, window)
            .await?;

        tracing::info!(user_id, payment_id, method, "Recorded paid payment");
        Ok(PaymentReceipt {
            payment_id,
            transaction_id,
            window,
        })
    }

    /// Create a hosted checkout source and a pending ledger row keyed by
    /// the gateway's source id.
    pub async fn create_gateway_checkout(
        &self,
        user_id: i64,
        membership_type: MembershipType,
        amount: f64,
        success_url: String,
        failed_url: String,
    ) -> Result<CheckoutSource, DomainError> {
        if amount <= 0.0 {
            return Err(DomainError::validation("Amount must be positive"));
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;

        let source = self
            .gateway
            .create_source(&CheckoutRequest {
                // The gateway takes centavos, the ledger stores pesos.
                amount_centavos: (amount * 100.0).round() as i64,
                description: format!("{} membership", membership_type.as_str()),
                success_url,
                failed_url,
            })
            .await?;

        self.payments
            .insert(&NewPayment {
                user_id,
                amount,
                method: "gcash".to_string(),
                membership_type,
                state: PaymentState::Pending,
                transaction_id: Some(source.source_id.clone()),
                window: None,
                notes: None,
            })
            .await?;

        tracing::info!(user_id, source_id = %source.source_id, "Created gateway checkout");
        Ok(source)
    }

    /// Process a webhook delivery.
    ///
    /// A bad signature is logged and ignored; so is an event for a
    /// payment we have no record of. Paid events extend the member's
    /// subscription by the plan recorded on the pending payment.
    pub async fn process_webhook(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookOutcome, DomainError> {
        if !self.gateway.verify_signature(payload, signature_header) {
            tracing::warn!("Webhook signature mismatch; ignoring delivery");
            return Ok(WebhookOutcome::InvalidSignature);
        }

        let event = match self.gateway.parse_event(payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Unparseable webhook payload: {}", e);
                return Ok(WebhookOutcome::Ignored);
            }
        };

        let new_state = match event.kind {
            GatewayEventKind::PaymentPaid | GatewayEventKind::SourceChargeable => {
                PaymentState::Paid
            }
            GatewayEventKind::PaymentFailed => PaymentState::Failed,
            GatewayEventKind::Other(kind) => {
                tracing::debug!(kind, "Ignoring webhook event");
                return Ok(WebhookOutcome::Ignored);
            }
        };

        let Some(resource_id) = event.resource_id else {
            return Ok(WebhookOutcome::Ignored);
        };
        let Some(payment) = self.payments.find_by_transaction_id(&resource_id).await? else {
            tracing::warn!(resource_id, "Webhook references unknown payment");
            return Ok(WebhookOutcome::UnknownPayment);
        };

        if payment.state == new_state {
            return Ok(WebhookOutcome::Ignored);
        }

        self.payments.mark_state(payment.id, new_state).await?;

        if new_state == PaymentState::Paid {
            let window = payment
                .membership_type
                .subscription_window(Utc::now().date_naive());
            self.users
                .activate_subscription(payment.user_id, payment.membership_type, payment.amount, window)
                .await?;
            tracing::info!(
                payment_id = payment.id,
                user_id = payment.user_id,
                "Webhook confirmed payment; subscription extended"
            );
        } else {
            tracing::info!(payment_id = payment.id, "Webhook marked payment failed");
        }

        Ok(WebhookOutcome::Processed)
    }
}
