//! Routes for attendance.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{
    attendance_for_day, attendance_history, attendance_today, check_in, generate_qr_token,
    notify_inactive, test_email,
};

/// Member attendance routes mounted under `/api/attendance`.
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/checkin", post(check_in))
        .route("/history", get(attendance_history))
}

/// Admin attendance routes mounted under `/api/admin`.
pub fn admin_attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(attendance_for_day))
        .route("/attendance/today", get(attendance_today))
        .route("/attendance/notify-inactive", post(notify_inactive))
        .route("/attendance/test-email", post(test_email))
        .route("/qr-token/generate", post(generate_qr_token))
}
