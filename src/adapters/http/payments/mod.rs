//! Payment endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{admin_payment_routes, member_payment_routes, paymongo_routes};
