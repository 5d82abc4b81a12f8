//! Meal planner endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::meal_planner_routes;
