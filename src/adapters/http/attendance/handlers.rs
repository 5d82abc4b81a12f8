//! Handlers for QR check-ins, attendance views, and the notification
//! sweep triggers.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{Duration, Utc};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::AppState;
use crate::domain::attendance::{build_qr_token, current_streak, validate_qr_token, DEFAULT_LOCATION};
use crate::domain::{DomainError, ErrorCode};

use super::dto::{
    AdminCheckInRow, AttendanceHistoryResponse, AttendanceQuery, AttendanceStats, CheckInRequest,
    CheckInResponse, CheckInRow, QrTokenResponse,
};

/// How long a generated QR token is advertised as valid.
const QR_TOKEN_TTL_HOURS: i64 = 24;

/// POST /api/attendance/checkin
pub async fn check_in(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_qr_token(&request.qr_token)?;

    let now = Utc::now();
    if state
        .attendance
        .has_checked_in_on(user.id, now.date_naive())
        .await?
    {
        return Err(DomainError::new(
            ErrorCode::DuplicateCheckIn,
            "You have already checked in today",
        )
        .into());
    }

    let location = request
        .location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let id = state.attendance.insert(user.id, now, &location).await?;

    tracing::info!(member_id = user.id, check_in_id = id, "Member checked in");
    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            id,
            check_in_time: now,
            location,
            message: "Checked in. Enjoy your workout!".to_string(),
        }),
    ))
}

/// GET /api/attendance/history
pub async fn attendance_history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.attendance.history_for_user(user.id).await?;
    let times: Vec<_> = history.iter().map(|c| c.check_in_time).collect();
    let rows: Vec<CheckInRow> = history.iter().map(CheckInRow::from_check_in).collect();
    Ok(Json(AttendanceHistoryResponse {
        stats: AttendanceStats {
            total_check_ins: rows.len() as i64,
            current_streak: current_streak(&times),
        },
        history: rows,
    }))
}

/// GET /api/admin/attendance?date=yyyy-mm-dd (today when omitted)
pub async fn attendance_for_day(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AttendanceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let day = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let rows = state.attendance.list_for_day(day).await?;
    let items: Vec<AdminCheckInRow> = rows.iter().map(AdminCheckInRow::from_joined).collect();
    Ok(Json(items))
}

/// GET /api/admin/attendance/today
pub async fn attendance_today(
    state: State<AppState>,
    admin: RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    attendance_for_day(state, admin, Query(AttendanceQuery { date: None })).await
}

/// POST /api/admin/qr-token/generate
pub async fn generate_qr_token(
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    Ok(Json(QrTokenResponse {
        qr_token: build_qr_token(now, &token_suffix()),
        expires_at: now + Duration::hours(QR_TOKEN_TTL_HOURS),
    }))
}

/// Six hex characters of a fresh v4 UUID, uppercased.
fn token_suffix() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyInactiveRequest {
    pub threshold_days: Option<i64>,
}

/// POST /api/admin/attendance/notify-inactive
pub async fn notify_inactive(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<NotifyInactiveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.sweep.run_once(request.threshold_days).await?;
    Ok(Json(report))
}

#[derive(Debug, serde::Deserialize)]
pub struct TestEmailRequest {
    pub to: String,
}

/// POST /api/admin/attendance/test-email
pub async fn test_email(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<TestEmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .email
        .send(
            &request.to,
            "ActiveCore email test",
            "<p>If you can read this, email delivery works.</p>",
        )
        .await?;
    Ok(Json(serde_json::json!({ "message": "Test email sent" })))
}
