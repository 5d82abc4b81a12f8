//! Error types for the domain layer.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmailTaken,
    InvalidQrCode,

    // Authentication / authorization
    InvalidCredentials,
    Unauthorized,
    Forbidden,

    // Not found errors
    MemberNotFound,
    PaymentNotFound,
    PlanNotFound,
    RewardNotFound,

    // State errors
    DuplicateCheckIn,
    RewardAlreadyClaimed,
    InsufficientAttendance,

    // External services
    PaymentGatewayError,
    AiProviderError,
    EmailError,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::InvalidQrCode => "INVALID_QR_CODE",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::MemberNotFound => "MEMBER_NOT_FOUND",
            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::PlanNotFound => "PLAN_NOT_FOUND",
            ErrorCode::RewardNotFound => "REWARD_NOT_FOUND",
            ErrorCode::DuplicateCheckIn => "DUPLICATE_CHECK_IN",
            ErrorCode::RewardAlreadyClaimed => "REWARD_ALREADY_CLAIMED",
            ErrorCode::InsufficientAttendance => "INSUFFICIENT_ATTENDANCE",
            ErrorCode::PaymentGatewayError => "PAYMENT_GATEWAY_ERROR",
            ErrorCode::AiProviderError => "AI_PROVIDER_ERROR",
            ErrorCode::EmailError => "EMAIL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Creates a database error from an underlying driver error.
    pub fn database(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("Database error: {}", err))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
