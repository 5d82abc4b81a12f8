//! Member management endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{member_admin_routes, member_self_routes, registration_routes};
