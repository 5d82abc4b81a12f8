//! Error-to-response mapping for the REST API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::{DomainError, ErrorCode};

/// API error wrapper; every handler returns this on failure so clients
/// see a uniform `{ "error": ..., "code": ... }` body.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmailTaken
        | ErrorCode::InvalidQrCode
        | ErrorCode::DuplicateCheckIn
        | ErrorCode::RewardAlreadyClaimed
        | ErrorCode::InsufficientAttendance => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::MemberNotFound
        | ErrorCode::PaymentNotFound
        | ErrorCode::PlanNotFound
        | ErrorCode::RewardNotFound => StatusCode::NOT_FOUND,
        // External failures that reach a response have no fallback path.
        ErrorCode::PaymentGatewayError
        | ErrorCode::AiProviderError
        | ErrorCode::EmailError
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        // Do not leak driver details to clients.
        let message = if self.0.code == ErrorCode::DatabaseError {
            "Internal server error".to_string()
        } else {
            self.0.message.clone()
        };
        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": self.0.code.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_by_category() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCode::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::MemberNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(ErrorCode::DuplicateCheckIn),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(ErrorCode::InsufficientAttendance),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(ErrorCode::PaymentGatewayError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_hide_details() {
        let response =
            ApiError(DomainError::database("connection refused on 10.0.0.3")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
