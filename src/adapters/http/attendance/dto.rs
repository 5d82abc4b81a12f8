//! Request/response DTOs for attendance endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::{CheckIn, CheckInWithMember};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub qr_token: String,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub id: i64,
    pub check_in_time: DateTime<Utc>,
    pub location: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRow {
    pub id: i64,
    pub check_in_time: DateTime<Utc>,
    pub location: String,
}

impl CheckInRow {
    pub fn from_check_in(row: &CheckIn) -> Self {
        Self {
            id: row.id,
            check_in_time: row.check_in_time,
            location: row.location.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_check_ins: i64,
    pub current_streak: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceHistoryResponse {
    pub history: Vec<CheckInRow>,
    pub stats: AttendanceStats,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckInRow {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub check_in_time: DateTime<Utc>,
    pub location: String,
}

impl AdminCheckInRow {
    pub fn from_joined(row: &CheckInWithMember) -> Self {
        Self {
            id: row.check_in.id,
            user_id: row.check_in.user_id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            check_in_time: row.check_in.check_in_time,
            location: row.check_in.location.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrTokenResponse {
    pub qr_token: String,
    pub expires_at: DateTime<Utc>,
}
