//! Attendance reward ladder.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::errors::{DomainError, ErrorCode};

/// A rung on the reward ladder.
#[derive(Debug, Clone, Serialize)]
pub struct Reward {
    pub id: i64,
    pub name: &'static str,
    pub description: &'static str,
    /// Check-ins required to unlock.
    pub required_check_ins: i64,
    pub points: i64,
}

/// Fixed ladder, ordered by threshold.
pub static REWARD_LADDER: Lazy<Vec<Reward>> = Lazy::new(|| {
    vec![
        Reward {
            id: 1,
            name: "Bronze Badge",
            description: "Check in 3 times",
            required_check_ins: 3,
            points: 10,
        },
        Reward {
            id: 2,
            name: "Silver Badge",
            description: "Check in 7 times",
            required_check_ins: 7,
            points: 25,
        },
        Reward {
            id: 3,
            name: "Gold Badge",
            description: "Check in 14 times",
            required_check_ins: 14,
            points: 50,
        },
        Reward {
            id: 4,
            name: "Attendance Pro",
            description: "Check in 30 times",
            required_check_ins: 30,
            points: 100,
        },
    ]
});

/// Look up a rung by id.
pub fn find_reward(reward_id: i64) -> Option<&'static Reward> {
    REWARD_LADDER.iter().find(|r| r.id == reward_id)
}

/// Check that a claim is allowed: the reward exists, the member has enough
/// check-ins, and it has not already been claimed.
pub fn check_claim(
    reward_id: i64,
    total_check_ins: i64,
    already_claimed: bool,
) -> Result<&'static Reward, DomainError> {
    let reward = find_reward(reward_id)
        .ok_or_else(|| DomainError::new(ErrorCode::RewardNotFound, "Reward not found"))?;

    if already_claimed {
        return Err(DomainError::new(
            ErrorCode::RewardAlreadyClaimed,
            "Reward already claimed",
        ));
    }
    if total_check_ins < reward.required_check_ins {
        return Err(DomainError::new(
            ErrorCode::InsufficientAttendance,
            format!(
                "Requires {} check-ins, you have {}",
                reward.required_check_ins, total_check_ins
            ),
        ));
    }
    Ok(reward)
}
