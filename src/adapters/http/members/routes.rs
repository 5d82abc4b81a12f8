//! Routes for member management.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{
    add_member, delete_member, get_member, get_subscription, list_members, register,
    update_member,
};

/// Routes mounted under `/api/members`.
pub fn member_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(add_member))
        .route(
            "/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
}

/// Routes mounted under `/api/member`.
pub fn member_self_routes() -> Router<AppState> {
    Router::new().route("/subscription", get(get_subscription))
}

/// Public registration route mounted under `/api`.
pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}
