//! REST API: routers, handlers, DTOs, and middleware.

pub mod attendance;
pub mod auth;
pub mod error;
pub mod meal_planner;
pub mod members;
pub mod middleware;
pub mod payments;
pub mod rewards;

use std::sync::Arc;

use axum::Router;

use crate::application::{InactivitySweep, MealPlanService, PaymentService};
use crate::ports::{
    AttendanceRepository, EmailSender, PasswordHasher, PaymentRepository, RewardRepository,
    TokenService, UserRepository,
};

use middleware::{auth_middleware, AuthState};

/// Shared state behind every handler. Cloned per request; all fields are
/// `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub rewards: Arc<dyn RewardRepository>,
    pub email: Arc<dyn EmailSender>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub payment_service: Arc<PaymentService>,
    pub meal_plans: Arc<MealPlanService>,
    pub sweep: Arc<InactivitySweep>,
    pub checkout_success_url: String,
    pub checkout_failed_url: String,
}

/// The full `/api` router with the auth middleware applied.
///
/// The middleware validates tokens when present; individual handlers
/// enforce `RequireAuth`/`RequireAdmin`. The webhook and the probes stay
/// reachable without a token.
pub fn router(state: AppState) -> Router {
    let auth_state: AuthState = state.tokens.clone();
    let api = Router::new()
        .merge(auth::probe_routes())
        .merge(members::registration_routes())
        .nest("/auth", auth::auth_routes())
        .nest("/user", auth::user_routes())
        .nest("/members", members::member_admin_routes())
        .nest(
            "/member",
            members::member_self_routes().merge(payments::member_payment_routes()),
        )
        .nest("/admin", attendance::admin_attendance_routes())
        .nest("/admin/payments", payments::admin_payment_routes())
        .nest("/payments/paymongo", payments::paymongo_routes())
        .nest("/meal-planner", meal_planner::meal_planner_routes())
        .nest("/attendance", attendance::attendance_routes())
        .nest("/rewards", rewards::reward_routes())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    Router::new().nest("/api", api).with_state(state)
}
