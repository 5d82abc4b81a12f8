//! Authentication endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{auth_routes, probe_routes, user_routes};
