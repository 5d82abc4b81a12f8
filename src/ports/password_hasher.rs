//! Password hashing port.

use crate::domain::DomainError;

/// Port for password hashing and verification.
///
/// Sync on purpose: argon2 is CPU-bound and fast enough to run inline
/// for login-frequency traffic.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
