//! Member identity and subscription types.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, ErrorCode};

/// Access role carried in the JWT and checked by the admin routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Unknown role: {}", other),
            )),
        }
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            other => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Unknown member status: {}", other),
            )),
        }
    }
}

/// Membership plan. Determines both price expectations and the length of
/// the subscription window a successful payment buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Monthly,
    Quarterly,
    Annual,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Monthly => "monthly",
            MembershipType::Quarterly => "quarterly",
            MembershipType::Annual => "annual",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "monthly" => Ok(MembershipType::Monthly),
            "quarterly" => Ok(MembershipType::Quarterly),
            "annual" => Ok(MembershipType::Annual),
            other => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Unknown membership type: {}", other),
            )),
        }
    }

    /// Calendar months one paid period covers.
    pub fn months(&self) -> u32 {
        match self {
            MembershipType::Monthly => 1,
            MembershipType::Quarterly => 3,
            MembershipType::Annual => 12,
        }
    }

    /// Subscription window starting on the given date.
    ///
    /// Uses real calendar months, so Jan 31 + 1 month lands on Feb 28/29
    /// rather than overflowing into March.
    pub fn subscription_window(&self, start: NaiveDate) -> SubscriptionWindow {
        let end = start
            .checked_add_months(Months::new(self.months()))
            .unwrap_or(start);
        SubscriptionWindow { start, end }
    }
}

/// A paid subscription period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Payment standing recorded on the member row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Pending,
    Paid,
    Failed,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Pending => "pending",
            PaymentState::Paid => "paid",
            PaymentState::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(PaymentState::Pending),
            // Gateways report "completed"; normalize to our terminal state.
            "paid" | "completed" => Ok(PaymentState::Paid),
            "failed" => Ok(PaymentState::Failed),
            other => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Unknown payment state: {}", other),
            )),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentState::Pending)
    }
}
