//! Token issuance and validation port.

use crate::domain::{AuthError, CurrentUser};

/// Port for bearer tokens. The HTTP middleware only depends on this
/// trait, so tests can swap in a mock without touching JWT machinery.
pub trait TokenService: Send + Sync {
    fn issue(&self, user: &CurrentUser) -> Result<String, AuthError>;

    fn validate(&self, token: &str) -> Result<CurrentUser, AuthError>;
}
