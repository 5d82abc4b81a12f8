//! Request/response DTOs for reward endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::reward::Reward;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardStatus {
    pub id: i64,
    pub name: &'static str,
    pub description: &'static str,
    pub required_check_ins: i64,
    pub points: i64,
    pub unlocked: bool,
    pub claimed: bool,
}

impl RewardStatus {
    pub fn annotate(reward: &'static Reward, total_check_ins: i64, claimed: bool) -> Self {
        Self {
            id: reward.id,
            name: reward.name,
            description: reward.description,
            required_check_ins: reward.required_check_ins,
            points: reward.points,
            unlocked: total_check_ins >= reward.required_check_ins,
            claimed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableRewardsResponse {
    pub total_check_ins: i64,
    pub rewards: Vec<RewardStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardRequest {
    pub reward_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardResponse {
    pub reward_id: i64,
    pub name: &'static str,
    pub points: i64,
    pub message: String,
}
