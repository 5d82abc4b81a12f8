//! Authenticated principal and authentication errors.

use thiserror::Error;

use super::member::Role;

/// The validated identity attached to a request after the auth
/// middleware accepts a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Errors from token validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token could not be issued: {0}")]
    IssueFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_check() {
        assert!(CurrentUser::new(1, Role::Admin).is_admin());
        assert!(!CurrentUser::new(2, Role::Member).is_admin());
    }
}
