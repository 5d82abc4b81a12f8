//! Routes for the meal planner, mounted under `/api/meal-planner`.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{
    delete_plan, generate_plan, get_plan, list_plans, regenerate_meal, save_plan,
};

pub fn meal_planner_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_plan))
        .route("/regenerate", post(regenerate_meal))
        .route("/save", post(save_plan))
        .route("/plans", get(list_plans))
        .route("/plans/:id", get(get_plan).delete(delete_plan))
}
