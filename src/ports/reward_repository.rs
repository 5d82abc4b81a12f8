//! Reward claim persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// A recorded claim.
#[derive(Debug, Clone)]
pub struct RewardClaim {
    pub reward_id: i64,
    pub claimed_at: DateTime<Utc>,
}

/// Port for reward claims.
#[async_trait]
pub trait RewardRepository: Send + Sync {
    async fn claims_for_user(&self, user_id: i64) -> Result<Vec<RewardClaim>, DomainError>;

    async fn has_claimed(&self, user_id: i64, reward_id: i64) -> Result<bool, DomainError>;

    async fn insert_claim(&self, user_id: i64, reward_id: i64) -> Result<(), DomainError>;
}
