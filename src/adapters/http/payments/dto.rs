//! Request/response DTOs for payment endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MembershipType, PaymentState, SubscriptionWindow};
use crate::ports::{PaymentRecord, PaymentSummary, PaymentWithMember};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcashPaymentRequest {
    pub membership_type: MembershipType,
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashPaymentRequest {
    pub user_id: i64,
    pub membership_type: MembershipType,
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceiptResponse {
    pub payment_id: i64,
    pub transaction_id: String,
    pub subscription_start: NaiveDate,
    pub subscription_end: NaiveDate,
    pub message: String,
}

impl PaymentReceiptResponse {
    pub fn new(
        payment_id: i64,
        transaction_id: String,
        window: SubscriptionWindow,
        message: &str,
    ) -> Self {
        Self {
            payment_id,
            transaction_id,
            subscription_start: window.start,
            subscription_end: window.end,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceRequest {
    pub membership_type: MembershipType,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceResponse {
    pub source_id: String,
    pub checkout_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQuery {
    pub source_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub source_id: String,
    pub status: PaymentState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub method: String,
    pub membership_type: MembershipType,
    pub status: PaymentState,
    pub transaction_id: Option<String>,
    pub subscription_start: Option<NaiveDate>,
    pub subscription_end: Option<NaiveDate>,
    pub notes: Option<String>,
    pub payment_date: DateTime<Utc>,
}

impl PaymentRow {
    pub fn from_record(record: &PaymentRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            amount: record.amount,
            method: record.method.clone(),
            membership_type: record.membership_type,
            status: record.state,
            transaction_id: record.transaction_id.clone(),
            subscription_start: record.subscription_start,
            subscription_end: record.subscription_end,
            notes: record.notes.clone(),
            payment_date: record.payment_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPaymentRow {
    #[serde(flatten)]
    pub payment: PaymentRow,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl AdminPaymentRow {
    pub fn from_joined(row: &PaymentWithMember) -> Self {
        Self {
            payment: PaymentRow::from_record(&row.payment),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummaryResponse {
    pub total_revenue: f64,
    pub paid_count: i64,
    pub pending_count: i64,
}

impl PaymentSummaryResponse {
    pub fn from_summary(summary: &PaymentSummary) -> Self {
        Self {
            total_revenue: summary.total_revenue,
            paid_count: summary.paid_count,
            pending_count: summary.pending_count,
        }
    }
}
