//! PostgreSQL implementation of reward claim persistence.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::{DomainError, ErrorCode};
use crate::ports::{RewardClaim, RewardRepository};

/// Reward claims backed by the `rewards_claimed` table.
pub struct PgRewardRepository {
    pool: PgPool,
}

impl PgRewardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RewardRepository for PgRewardRepository {
    async fn claims_for_user(&self, user_id: i64) -> Result<Vec<RewardClaim>, DomainError> {
        let rows = sqlx::query(
            "SELECT reward_id, claimed_at FROM rewards_claimed \
             WHERE user_id = $1 ORDER BY claimed_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.into_iter()
            .map(|row| {
                Ok(RewardClaim {
                    reward_id: row.try_get("reward_id").map_err(DomainError::database)?,
                    claimed_at: row.try_get("claimed_at").map_err(DomainError::database)?,
                })
            })
            .collect()
    }

    async fn has_claimed(&self, user_id: i64, reward_id: i64) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM rewards_claimed \
             WHERE user_id = $1 AND reward_id = $2) AS claimed",
        )
        .bind(user_id)
        .bind(reward_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.try_get("claimed").map_err(DomainError::database)
    }

    async fn insert_claim(&self, user_id: i64, reward_id: i64) -> Result<(), DomainError> {
        let result = sqlx::query(
            "INSERT INTO rewards_claimed (user_id, reward_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, reward_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(reward_id)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        // The claim service checks first, but the unique index is the
        // last line of defense under concurrent claims.
        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RewardAlreadyClaimed,
                "Reward already claimed",
            ));
        }
        Ok(())
    }
}
