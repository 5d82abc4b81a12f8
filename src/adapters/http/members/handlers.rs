//! Handlers for registration and member administration.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::AppState;
use crate::domain::{DomainError, ErrorCode, MemberStatus, PaymentState, Role};
use crate::ports::{MemberUpdate, NewMember};

use super::dto::{
    MemberListItem, MemberResponse, RegisterRequest, RegisterResponse, SubscriptionResponse,
    UpdateMemberRequest,
};

const DEFAULT_MONTHLY_PRICE: f64 = 1500.0;
const MIN_PASSWORD_LEN: usize = 8;

fn validate_registration(request: &RegisterRequest) -> Result<(), DomainError> {
    if request.email.trim().is_empty()
        || request.first_name.trim().is_empty()
        || request.last_name.trim().is_empty()
    {
        return Err(DomainError::validation(
            "Email, first name, and last name are required",
        ));
    }
    if !request.email.contains('@') {
        return Err(DomainError::validation("Email address is not valid"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

async fn insert_member(
    state: &AppState,
    request: RegisterRequest,
) -> Result<i64, DomainError> {
    validate_registration(&request)?;

    let window = request
        .membership_type
        .subscription_window(Utc::now().date_naive());
    let member = NewMember {
        email: request.email.trim().to_lowercase(),
        password_hash: state.hasher.hash(&request.password)?,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        phone: request.phone,
        gender: request.gender,
        date_of_birth: request.date_of_birth,
        role: Role::Member,
        status: MemberStatus::Active,
        membership_type: request.membership_type,
        membership_price: request.membership_price.unwrap_or(DEFAULT_MONTHLY_PRICE),
        window,
        payment_state: PaymentState::Pending,
        emergency_contact: request.emergency_contact,
        address: request.address,
    };
    state.users.create(&member).await
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = insert_member(&state, request).await?;
    tracing::info!(member_id = id, "Member registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id,
            message: "Registration successful".to_string(),
        }),
    ))
}

/// POST /api/members (admin)
pub async fn add_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = insert_member(&state, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id,
            message: "Member added".to_string(),
        }),
    ))
}

/// GET /api/members (admin)
pub async fn list_members(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let members = state.users.list().await?;
    let items: Vec<MemberListItem> = members.iter().map(MemberListItem::from_summary).collect();
    Ok(Json(items))
}

/// GET /api/members/:id (admin)
pub async fn get_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
    Ok(Json(MemberResponse::from_record(&member)))
}

/// PUT /api/members/:id (admin)
pub async fn update_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password_hash = match request.password.as_deref() {
        Some(password) if password.len() < MIN_PASSWORD_LEN => {
            return Err(DomainError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ))
            .into());
        }
        Some(password) => Some(state.hasher.hash(password)?),
        None => None,
    };

    let changes = MemberUpdate {
        email: request.email.map(|e| e.trim().to_lowercase()),
        password_hash,
        first_name: request.first_name,
        last_name: request.last_name,
        phone: request.phone,
        gender: request.gender,
        date_of_birth: request.date_of_birth,
        status: request.status,
        membership_type: request.membership_type,
        membership_price: request.membership_price,
        emergency_contact: request.emergency_contact,
        address: request.address,
    };
    state.users.update(id, &changes).await?;
    Ok(Json(serde_json::json!({ "message": "Member updated" })))
}

/// DELETE /api/members/:id (admin)
pub async fn delete_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.users.delete(id).await?;
    tracing::info!(member_id = id, "Member deleted");
    Ok(Json(serde_json::json!({ "message": "Member deleted" })))
}

/// GET /api/member/subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;

    let days_remaining = member
        .subscription_end
        .map(|end| (end - Utc::now().date_naive()).num_days());
    Ok(Json(SubscriptionResponse {
        membership_type: member.membership_type,
        membership_price: member.membership_price,
        status: member.status,
        payment_status: member.payment_state,
        subscription_start: member.subscription_start,
        subscription_end: member.subscription_end,
        days_remaining,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            phone: None,
            gender: None,
            date_of_birth: None,
            membership_type: crate::domain::MembershipType::Monthly,
            membership_price: None,
            emergency_contact: None,
            address: None,
        }
    }

    #[test]
    fn registration_requires_valid_email_and_password() {
        assert!(validate_registration(&request("ana@example.com", "longenough")).is_ok());
        assert!(validate_registration(&request("", "longenough")).is_err());
        assert!(validate_registration(&request("not-an-email", "longenough")).is_err());
        assert!(validate_registration(&request("ana@example.com", "short")).is_err());
    }

    #[test]
    fn register_request_accepts_camel_case() {
        let parsed: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "ana@example.com",
            "password": "longenough",
            "firstName": "Ana",
            "lastName": "Reyes",
            "membershipType": "quarterly",
            "dateOfBirth": "1995-04-02",
        }))
        .unwrap();
        assert_eq!(
            parsed.membership_type,
            crate::domain::MembershipType::Quarterly
        );
        assert_eq!(parsed.first_name, "Ana");
    }
}
