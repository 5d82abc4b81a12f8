//! Routes for rewards, mounted under `/api/rewards`.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{available_rewards, claim_reward};

pub fn reward_routes() -> Router<AppState> {
    Router::new()
        .route("/available", get(available_rewards))
        .route("/claim", post(claim_reward))
}
