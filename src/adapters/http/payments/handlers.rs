//! Handlers for payment recording, the gateway checkout flow, and the
//! webhook receiver.

use axum::body::Bytes;
use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::AppState;
use crate::domain::PaymentState;

use super::dto::{
    AdminPaymentRow, CashPaymentRequest, CreateSourceRequest, CreateSourceResponse,
    GcashPaymentRequest, PaymentReceiptResponse, PaymentRow, PaymentSummaryResponse, VerifyQuery,
    VerifyResponse,
};

/// Signature header sent by the gateway.
const SIGNATURE_HEADER: &str = "paymongo-signature";

/// POST /api/member/payment/gcash
pub async fn record_gcash_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<GcashPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state
        .payment_service
        .record_paid_payment(
            user.id,
            request.membership_type,
            request.amount,
            "gcash",
            request.notes,
        )
        .await?;
    Ok(Json(PaymentReceiptResponse::new(
        receipt.payment_id,
        receipt.transaction_id,
        receipt.window,
        "Payment recorded",
    )))
}

/// POST /api/admin/payments/record-cash
pub async fn record_cash_payment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<CashPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state
        .payment_service
        .record_paid_payment(
            request.user_id,
            request.membership_type,
            request.amount,
            "cash",
            request.notes,
        )
        .await?;
    Ok(Json(PaymentReceiptResponse::new(
        receipt.payment_id,
        receipt.transaction_id,
        receipt.window,
        "Cash payment recorded",
    )))
}

/// GET /api/admin/payments/all
pub async fn list_all_payments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.payments.list_all().await?;
    let rows: Vec<AdminPaymentRow> = payments.iter().map(AdminPaymentRow::from_joined).collect();
    Ok(Json(rows))
}

/// GET /api/member/payments — the member's own ledger.
pub async fn list_my_payments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.payments.list_for_user(user.id).await?;
    let rows: Vec<PaymentRow> = payments.iter().map(PaymentRow::from_record).collect();
    Ok(Json(rows))
}

/// GET /api/admin/payments/summary
pub async fn payment_summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.payments.summary().await?;
    Ok(Json(PaymentSummaryResponse::from_summary(&summary)))
}

/// POST /api/payments/paymongo/create-source
pub async fn create_source(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateSourceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let source = state
        .payment_service
        .create_gateway_checkout(
            user.id,
            request.membership_type,
            request.amount,
            state.checkout_success_url.clone(),
            state.checkout_failed_url.clone(),
        )
        .await?;
    Ok(Json(CreateSourceResponse {
        source_id: source.source_id,
        checkout_url: source.checkout_url,
    }))
}

/// POST /api/payments/paymongo/webhook
///
/// Unauthenticated; trust comes from the HMAC signature. Always answers
/// 200 so the gateway does not retry deliveries we chose to ignore.
pub async fn paymongo_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let outcome = state
        .payment_service
        .process_webhook(&body, signature)
        .await?;
    tracing::debug!(?outcome, "Webhook handled");
    Ok((StatusCode::OK, Json(serde_json::json!({ "received": true }))))
}

/// GET /api/payments/paymongo/verify?sourceId=...
///
/// Unknown references read back as `pending`; the client polls this
/// after returning from the checkout redirect.
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state
        .payments
        .find_by_transaction_id(&query.source_id)
        .await?
        .map(|p| p.state)
        .unwrap_or(PaymentState::Pending);
    Ok(Json(VerifyResponse {
        source_id: query.source_id,
        status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_query_accepts_camel_case() {
        let query: VerifyQuery =
            serde_json::from_value(serde_json::json!({ "sourceId": "src_123" })).unwrap();
        assert_eq!(query.source_id, "src_123");
    }

    #[test]
    fn gcash_request_shape() {
        let parsed: GcashPaymentRequest = serde_json::from_value(serde_json::json!({
            "membershipType": "annual",
            "amount": 15000.0,
        }))
        .unwrap();
        assert_eq!(parsed.membership_type, crate::domain::MembershipType::Annual);
        assert!(parsed.notes.is_none());
    }
}
