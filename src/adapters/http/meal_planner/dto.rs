//! Request/response DTOs for the meal planner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::mealplan::{GeneratedPlan, Meal};
use crate::ports::{PlanSummary, StoredPlan};

fn default_goal() -> String {
    "maintenance".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    #[serde(default = "default_goal")]
    pub goal: String,
    #[serde(default)]
    pub restrictions: Vec<String>,
    pub plan_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanResponse {
    #[serde(flatten)]
    pub plan: GeneratedPlan,
    pub source: &'static str,
    pub saved: bool,
    pub plan_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateMealRequest {
    pub current_meal: String,
    /// Dish names the replacement must avoid, beyond the current meal.
    #[serde(default)]
    pub exclude_meal_names: Vec<String>,
    #[serde(default = "default_goal")]
    pub goal: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateMealResponse {
    pub meal: Meal,
    pub source: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlanRequest {
    pub plan_id: Option<i64>,
    pub name: String,
    pub data: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlanResponse {
    pub plan_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummaryResponse {
    pub id: i64,
    pub name: String,
    pub generated_at: Option<DateTime<Utc>>,
}

impl PlanSummaryResponse {
    pub fn from_summary(summary: &PlanSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            generated_at: summary.generated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlanResponse {
    pub id: i64,
    pub name: String,
    pub data: Value,
    pub generated_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredPlanResponse {
    pub fn from_stored(plan: StoredPlan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            data: plan.data,
            generated_at: plan.generated_at,
            updated_at: plan.updated_at,
        }
    }
}
