//! Attendance endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{admin_attendance_routes, attendance_routes};
