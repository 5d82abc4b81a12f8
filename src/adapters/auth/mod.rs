//! Authentication adapters: JWT tokens and argon2 password hashing.

mod jwt;
mod mock;
mod password;

pub use jwt::JwtTokenService;
pub use mock::MockTokenService;
pub use password::Argon2PasswordHasher;
