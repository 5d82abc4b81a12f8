//! Handlers for the attendance reward ladder.

use std::collections::HashSet;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::domain::reward::{check_claim, REWARD_LADDER};

use super::dto::{
    AvailableRewardsResponse, ClaimRewardRequest, ClaimRewardResponse, RewardStatus,
};

/// GET /api/rewards/available
pub async fn available_rewards(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let total_check_ins = state.attendance.count_for_user(user.id).await?;
    let claimed: HashSet<i64> = state
        .rewards
        .claims_for_user(user.id)
        .await?
        .into_iter()
        .map(|c| c.reward_id)
        .collect();

    let rewards: Vec<RewardStatus> = REWARD_LADDER
        .iter()
        .map(|r| RewardStatus::annotate(r, total_check_ins, claimed.contains(&r.id)))
        .collect();
    Ok(Json(AvailableRewardsResponse {
        total_check_ins,
        rewards,
    }))
}

/// POST /api/rewards/claim
pub async fn claim_reward(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ClaimRewardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let total_check_ins = state.attendance.count_for_user(user.id).await?;
    let already_claimed = state.rewards.has_claimed(user.id, request.reward_id).await?;

    let reward = check_claim(request.reward_id, total_check_ins, already_claimed)?;
    // A concurrent duplicate claim still loses here on the unique index.
    state.rewards.insert_claim(user.id, reward.id).await?;

    tracing::info!(member_id = user.id, reward = reward.name, "Reward claimed");
    Ok(Json(ClaimRewardResponse {
        reward_id: reward.id,
        name: reward.name,
        points: reward.points,
        message: format!("Congratulations! You earned the {}", reward.name),
    }))
}
