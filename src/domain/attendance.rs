//! Attendance check-in rules: QR validation and streak math.

use chrono::{DateTime, NaiveDate, Utc};

use super::errors::{DomainError, ErrorCode};

/// Marker every valid gym QR token must carry.
pub const QR_GYM_MARKER: &str = "ACTIVECORE_GYM";

/// Default location recorded when a check-in omits one.
pub const DEFAULT_LOCATION: &str = "Main Gym";

/// Validate a scanned QR token.
///
/// Tokens are rotated by the front desk but all embed the gym marker;
/// anything without it was not produced by us.
pub fn validate_qr_token(token: &str) -> Result<(), DomainError> {
    if token.trim().is_empty() {
        return Err(DomainError::validation("QR token is required"));
    }
    if !token.contains(QR_GYM_MARKER) {
        return Err(DomainError::new(
            ErrorCode::InvalidQrCode,
            "Invalid QR code. Please scan the official gym QR code.",
        ));
    }
    Ok(())
}

/// Build a fresh QR token: `ACTIVECORE_GYM_<yyyymmddhhmmss>_<suffix>`.
pub fn build_qr_token(now: DateTime<Utc>, suffix: &str) -> String {
    format!("{}_{}_{}", QR_GYM_MARKER, now.format("%Y%m%d%H%M%S"), suffix)
}

/// Current streak in days, given check-in timestamps sorted descending.
///
/// Counts consecutive calendar days walking back from the most recent
/// check-in. Multiple check-ins on one day (not possible under the
/// one-per-day rule, but tolerated here) count once.
pub fn current_streak(check_ins_desc: &[DateTime<Utc>]) -> u32 {
    let mut days: Vec<NaiveDate> = check_ins_desc.iter().map(|t| t.date_naive()).collect();
    days.dedup();

    let mut streak = 0u32;
    let mut expected: Option<NaiveDate> = None;
    for day in days {
        match expected {
            None => {
                streak = 1;
                expected = day.pred_opt();
            }
            Some(want) if day == want => {
                streak += 1;
                expected = day.pred_opt();
            }
            Some(_) => break,
        }
    }
    streak
}
