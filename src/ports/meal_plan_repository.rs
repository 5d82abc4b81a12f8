//! Meal plan persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::DomainError;

/// A stored plan row.
#[derive(Debug, Clone)]
pub struct StoredPlan {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub data: Value,
    pub generated_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Listing row without the (large) plan payload.
#[derive(Debug, Clone)]
pub struct PlanSummary {
    pub id: i64,
    pub name: String,
    pub generated_at: Option<DateTime<Utc>>,
}

/// Port for meal plan persistence.
///
/// Implementations must tolerate partially migrated schemas: the
/// timestamp columns on `meal_plans` are optional and may be missing.
#[async_trait]
pub trait MealPlanRepository: Send + Sync {
    /// Make sure a preference row exists for the member; returns its id
    /// when the table supports it.
    async fn ensure_preference(
        &self,
        user_id: i64,
        preferences: &Value,
    ) -> Result<Option<i64>, DomainError>;

    async fn insert(
        &self,
        user_id: i64,
        preference_id: Option<i64>,
        name: &str,
        data: &Value,
    ) -> Result<i64, DomainError>;

    async fn update(&self, plan_id: i64, name: &str, data: &Value) -> Result<(), DomainError>;

    /// The member's plans, newest first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<PlanSummary>, DomainError>;

    async fn find(&self, plan_id: i64) -> Result<Option<StoredPlan>, DomainError>;

    async fn delete(&self, plan_id: i64) -> Result<(), DomainError>;
}
