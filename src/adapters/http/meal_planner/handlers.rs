//! Handlers for meal plan generation and the saved-plan CRUD surface.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;

use super::dto::{
    GeneratePlanRequest, GeneratePlanResponse, PlanSummaryResponse, RegenerateMealRequest,
    RegenerateMealResponse, SavePlanRequest, SavePlanResponse, StoredPlanResponse,
};

/// POST /api/meal-planner/generate
pub async fn generate_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<GeneratePlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .meal_plans
        .generate(
            user.id,
            &request.goal,
            &request.restrictions,
            request.plan_name,
        )
        .await?;
    Ok(Json(GeneratePlanResponse {
        plan: outcome.plan,
        source: outcome.source.as_str(),
        saved: outcome.saved_plan_id.is_some(),
        plan_id: outcome.saved_plan_id,
    }))
}

/// POST /api/meal-planner/regenerate
pub async fn regenerate_meal(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<RegenerateMealRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (meal, source) = state
        .meal_plans
        .regenerate_meal(
            &request.current_meal,
            &request.exclude_meal_names,
            &request.goal,
        )
        .await?;
    Ok(Json(RegenerateMealResponse {
        meal,
        source: source.as_str(),
    }))
}

/// POST /api/meal-planner/save
pub async fn save_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SavePlanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_id = state
        .meal_plans
        .save(&user, request.plan_id, &request.name, &request.data)
        .await?;
    Ok(Json(SavePlanResponse {
        plan_id,
        message: "Meal plan saved".to_string(),
    }))
}

/// GET /api/meal-planner/plans
pub async fn list_plans(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let plans = state.meal_plans.list(user.id).await?;
    let items: Vec<PlanSummaryResponse> =
        plans.iter().map(PlanSummaryResponse::from_summary).collect();
    Ok(Json(items))
}

/// GET /api/meal-planner/plans/:id
pub async fn get_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state.meal_plans.get(&user, id).await?;
    Ok(Json(StoredPlanResponse::from_stored(plan)))
}

/// DELETE /api/meal-planner/plans/:id
pub async fn delete_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.meal_plans.delete(&user, id).await?;
    Ok(Json(serde_json::json!({ "message": "Meal plan deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_defaults() {
        let parsed: GeneratePlanRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(parsed.goal, "maintenance");
        assert!(parsed.restrictions.is_empty());
        assert!(parsed.plan_name.is_none());
    }

    #[test]
    fn regenerate_request_shape() {
        let parsed: RegenerateMealRequest = serde_json::from_value(serde_json::json!({
            "currentMeal": "Chicken Adobo",
            "goal": "cutting",
        }))
        .unwrap();
        assert_eq!(parsed.current_meal, "Chicken Adobo");
        assert_eq!(parsed.goal, "cutting");
        assert!(parsed.exclude_meal_names.is_empty());

        let parsed: RegenerateMealRequest = serde_json::from_value(serde_json::json!({
            "currentMeal": "Chicken Adobo",
            "excludeMealNames": ["Sinigang na Baboy", "Grilled Bangus"],
        }))
        .unwrap();
        assert_eq!(parsed.exclude_meal_names.len(), 2);
    }
}
