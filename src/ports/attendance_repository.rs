//! Attendance persistence port.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::DomainError;

/// An attendance row.
#[derive(Debug, Clone)]
pub struct CheckIn {
    pub id: i64,
    pub user_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub location: String,
}

/// Attendance row joined to member identity for the admin views.
#[derive(Debug, Clone)]
pub struct CheckInWithMember {
    pub check_in: CheckIn,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Port for attendance persistence.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Whether the member already has a check-in on the given calendar day.
    async fn has_checked_in_on(&self, user_id: i64, day: NaiveDate) -> Result<bool, DomainError>;

    async fn insert(
        &self,
        user_id: i64,
        check_in_time: DateTime<Utc>,
        location: &str,
    ) -> Result<i64, DomainError>;

    /// The member's check-ins, newest first.
    async fn history_for_user(&self, user_id: i64) -> Result<Vec<CheckIn>, DomainError>;

    async fn count_for_user(&self, user_id: i64) -> Result<i64, DomainError>;

    /// All check-ins on a calendar day, joined to member identity.
    async fn list_for_day(&self, day: NaiveDate) -> Result<Vec<CheckInWithMember>, DomainError>;
}
