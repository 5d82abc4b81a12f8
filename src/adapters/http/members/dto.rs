//! Request/response DTOs for member endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{MemberStatus, MembershipType, PaymentState, Role};
use crate::ports::{MemberRecord, MemberSummary};

/// Member registration payload. Also used for the admin add-member
/// endpoint, which accepts the same shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub membership_type: MembershipType,
    /// Defaults to the base monthly rate when the client omits it.
    pub membership_price: Option<f64>,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: i64,
    pub message: String,
}

/// Full member view returned by profile and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: Role,
    pub status: MemberStatus,
    pub membership_type: MembershipType,
    pub membership_price: f64,
    pub join_date: NaiveDate,
    pub subscription_start: Option<NaiveDate>,
    pub subscription_end: Option<NaiveDate>,
    pub payment_status: PaymentState,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
}

impl MemberResponse {
    pub fn from_record(record: &MemberRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            phone: record.phone.clone(),
            gender: record.gender.clone(),
            date_of_birth: record.date_of_birth,
            role: record.role,
            status: record.status,
            membership_type: record.membership_type,
            membership_price: record.membership_price,
            join_date: record.join_date,
            subscription_start: record.subscription_start,
            subscription_end: record.subscription_end,
            payment_status: record.payment_state,
            emergency_contact: record.emergency_contact.clone(),
            address: record.address.clone(),
        }
    }
}

/// Row in the admin member listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListItem {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub membership_type: MembershipType,
    pub membership_price: f64,
    pub join_date: NaiveDate,
    pub subscription_end: Option<NaiveDate>,
    pub payment_status: PaymentState,
    pub total_payments: i64,
}

impl MemberListItem {
    pub fn from_summary(summary: &MemberSummary) -> Self {
        Self {
            id: summary.id,
            email: summary.email.clone(),
            first_name: summary.first_name.clone(),
            last_name: summary.last_name.clone(),
            phone: summary.phone.clone(),
            status: summary.status,
            membership_type: summary.membership_type,
            membership_price: summary.membership_price,
            join_date: summary.join_date,
            subscription_end: summary.subscription_end,
            payment_status: summary.payment_state,
            total_payments: summary.total_payments,
        }
    }
}

/// Partial member update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub status: Option<MemberStatus>,
    pub membership_type: Option<MembershipType>,
    pub membership_price: Option<f64>,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
}

/// Current member's subscription view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub membership_type: MembershipType,
    pub membership_price: f64,
    pub status: MemberStatus,
    pub payment_status: PaymentState,
    pub subscription_start: Option<NaiveDate>,
    pub subscription_end: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
}
