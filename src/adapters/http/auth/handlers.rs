//! Handlers for login, password changes, and the profile endpoint.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::members::dto::MemberResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::domain::{CurrentUser, DomainError, ErrorCode};

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse};

const MIN_PASSWORD_LEN: usize = 8;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return Err(DomainError::validation("Email and password are required").into());
    }

    let invalid =
        || DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password");

    let member = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid)?;
    if !state.hasher.verify(&request.password, &member.password_hash)? {
        return Err(invalid().into());
    }

    let user = CurrentUser::new(member.id, member.role);
    let token = state.tokens.issue(&user).map_err(|e| {
        DomainError::new(ErrorCode::InternalError, format!("Token issue failed: {}", e))
    })?;

    tracing::info!(member_id = member.id, "Member logged in");
    Ok(Json(LoginResponse {
        token,
        user: MemberResponse::from_record(&member),
    }))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.new_password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "New password must be at least {} characters",
            MIN_PASSWORD_LEN
        ))
        .into());
    }

    let member = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
    if !state
        .hasher
        .verify(&request.current_password, &member.password_hash)?
    {
        return Err(DomainError::new(
            ErrorCode::InvalidCredentials,
            "Current password is incorrect",
        )
        .into());
    }

    let hash = state.hasher.hash(&request.new_password)?;
    state.users.update_password(user.id, &hash).await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

/// GET /api/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
    Ok(Json(MemberResponse::from_record(&member)))
}

/// GET /api/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/system/status
pub async fn status() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "activecore-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/ping
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}
