//! Domain layer: pure types and rules, no I/O.

pub mod attendance;
pub mod auth;
pub mod errors;
pub mod mealplan;
pub mod member;
pub mod reward;

pub use auth::{AuthError, CurrentUser};
pub use errors::{DomainError, ErrorCode};
pub use member::{MemberStatus, MembershipType, PaymentState, Role, SubscriptionWindow};
