//! Member persistence port.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    DomainError, MemberStatus, MembershipType, PaymentState, Role, SubscriptionWindow,
};

/// Data for a new member row.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: Role,
    pub status: MemberStatus,
    pub membership_type: MembershipType,
    pub membership_price: f64,
    pub window: SubscriptionWindow,
    pub payment_state: PaymentState,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
}

/// A full member row.
#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
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
    pub payment_state: PaymentState,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing row for the admin members table.
#[derive(Debug, Clone)]
pub struct MemberSummary {
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
    pub payment_state: PaymentState,
    /// Number of payment rows recorded for the member.
    pub total_payments: i64,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub email: Option<String>,
    pub password_hash: Option<String>,
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

impl MemberUpdate {
    /// True when no field is set (an update would be a no-op).
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.gender.is_none()
            && self.date_of_birth.is_none()
            && self.status.is_none()
            && self.membership_type.is_none()
            && self.membership_price.is_none()
            && self.emergency_contact.is_none()
            && self.address.is_none()
    }
}

/// A member eligible for an inactivity reminder.
#[derive(Debug, Clone)]
pub struct InactiveMember {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_check_in: Option<DateTime<Utc>>,
}

/// Port for member persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new member. Fails with `EmailTaken` on a duplicate email.
    async fn create(&self, member: &NewMember) -> Result<i64, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberRecord>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<MemberRecord>, DomainError>;

    /// All members with their payment counts, newest first.
    async fn list(&self) -> Result<Vec<MemberSummary>, DomainError>;

    /// Apply a partial update. Fails with `MemberNotFound` when the row
    /// does not exist and `ValidationFailed` when the update is empty.
    async fn update(&self, id: i64, changes: &MemberUpdate) -> Result<(), DomainError>;

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), DomainError>;

    /// Hard delete. Fails with `MemberNotFound` when no row was removed.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    /// Mark the member paid and set a fresh subscription window.
    async fn activate_subscription(
        &self,
        id: i64,
        membership_type: MembershipType,
        price: f64,
        window: SubscriptionWindow,
    ) -> Result<(), DomainError>;

    /// Active members whose latest check-in is older than the threshold
    /// (or who never checked in).
    async fn list_inactive(&self, threshold_days: i64) -> Result<Vec<InactiveMember>, DomainError>;
}
