//! Routes for authentication and the health probes.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{change_password, get_profile, health, login, ping, status};

/// Routes mounted under `/api/auth`.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/change-password", post(change_password))
}

/// Routes mounted under `/api/user`.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}

/// Unauthenticated probe routes mounted under `/api`.
pub fn probe_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/system/status", get(status))
        .route("/ping", get(ping))
}
