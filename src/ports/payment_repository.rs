//! Payment ledger port.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{DomainError, MembershipType, PaymentState, SubscriptionWindow};

/// Data for a new payment row.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: i64,
    pub amount: f64,
    pub method: String,
    pub membership_type: MembershipType,
    pub state: PaymentState,
    pub transaction_id: Option<String>,
    pub window: Option<SubscriptionWindow>,
    pub notes: Option<String>,
}

/// A payment ledger row.
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub method: String,
    pub membership_type: MembershipType,
    pub state: PaymentState,
    pub transaction_id: Option<String>,
    pub subscription_start: Option<NaiveDate>,
    pub subscription_end: Option<NaiveDate>,
    pub notes: Option<String>,
    pub payment_date: DateTime<Utc>,
}

/// Ledger row joined to member identity for the admin listing.
#[derive(Debug, Clone)]
pub struct PaymentWithMember {
    pub payment: PaymentRecord,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Revenue summary for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentSummary {
    pub total_revenue: f64,
    pub paid_count: i64,
    pub pending_count: i64,
}

/// Port for the payment ledger.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, payment: &NewPayment) -> Result<i64, DomainError>;

    /// All payments joined to member identity, newest first.
    async fn list_all(&self) -> Result<Vec<PaymentWithMember>, DomainError>;

    /// Member's own payments, newest first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<PaymentRecord>, DomainError>;

    async fn summary(&self) -> Result<PaymentSummary, DomainError>;

    /// Look up by the gateway reference (source or payment id).
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError>;

    /// Transition a payment's state.
    async fn mark_state(&self, id: i64, state: PaymentState) -> Result<(), DomainError>;
}
