//! Routes for payments.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{
    create_source, list_all_payments, list_my_payments, paymongo_webhook, payment_summary,
    record_cash_payment, record_gcash_payment, verify_payment,
};

/// Member payment routes mounted under `/api/member`.
pub fn member_payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payment/gcash", post(record_gcash_payment))
        .route("/payments", get(list_my_payments))
}

/// Admin payment routes mounted under `/api/admin/payments`.
pub fn admin_payment_routes() -> Router<AppState> {
    Router::new()
        .route("/record-cash", post(record_cash_payment))
        .route("/all", get(list_all_payments))
        .route("/summary", get(payment_summary))
}

/// Gateway routes mounted under `/api/payments/paymongo`. The webhook is
/// unauthenticated; the rest require a bearer token.
pub fn paymongo_routes() -> Router<AppState> {
    Router::new()
        .route("/create-source", post(create_source))
        .route("/webhook", post(paymongo_webhook))
        .route("/verify", get(verify_payment))
}
