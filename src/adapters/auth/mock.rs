//! Mock token service for tests.

use std::collections::HashMap;

use crate::domain::{AuthError, CurrentUser};
use crate::ports::TokenService;

/// In-memory token service mapping fixed token strings to users.
#[derive(Default)]
pub struct MockTokenService {
    users: HashMap<String, CurrentUser>,
}

impl MockTokenService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: CurrentUser) -> Self {
        self.users.insert(token.into(), user);
        self
    }
}

impl TokenService for MockTokenService {
    fn issue(&self, user: &CurrentUser) -> Result<String, AuthError> {
        Ok(format!("mock-token-{}", user.id))
    }

    fn validate(&self, token: &str) -> Result<CurrentUser, AuthError> {
        self.users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
