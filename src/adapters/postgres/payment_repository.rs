//! PostgreSQL implementation of the payment ledger.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Row};

use crate::domain::{DomainError, ErrorCode, MembershipType, PaymentState};
use crate::ports::{
    NewPayment, PaymentRecord, PaymentRepository, PaymentSummary, PaymentWithMember,
};

/// Payment ledger backed by the `payments` table.
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PaymentRow {
    id: i64,
    user_id: i64,
    amount: f64,
    payment_method: String,
    membership_type: String,
    payment_status: String,
    transaction_id: Option<String>,
    subscription_start: Option<NaiveDate>,
    subscription_end: Option<NaiveDate>,
    notes: Option<String>,
    payment_date: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(PaymentRecord {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            method: row.payment_method,
            membership_type: MembershipType::parse(&row.membership_type)?,
            state: PaymentState::parse(&row.payment_status)?,
            transaction_id: row.transaction_id,
            subscription_start: row.subscription_start,
            subscription_end: row.subscription_end,
            notes: row.notes,
            payment_date: row.payment_date,
        })
    }
}

const PAYMENT_COLUMNS: &str = "id, user_id, amount, payment_method, membership_type, \
     payment_status, transaction_id, subscription_start, subscription_end, notes, payment_date";

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn insert(&self, payment: &NewPayment) -> Result<i64, DomainError> {
        let row = sqlx::query(
            "INSERT INTO payments (user_id, amount, payment_method, membership_type, \
             payment_status, transaction_id, subscription_start, subscription_end, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(payment.user_id)
        .bind(payment.amount)
        .bind(&payment.method)
        .bind(payment.membership_type.as_str())
        .bind(payment.state.as_str())
        .bind(&payment.transaction_id)
        .bind(payment.window.map(|w| w.start))
        .bind(payment.window.map(|w| w.end))
        .bind(&payment.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.try_get("id").map_err(DomainError::database)
    }

    async fn list_all(&self) -> Result<Vec<PaymentWithMember>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {}, u.first_name, u.last_name, u.email \
             FROM payments p JOIN users u ON u.id = p.user_id \
             ORDER BY p.payment_date DESC",
            PAYMENT_COLUMNS
                .split(", ")
                .map(|c| format!("p.{}", c))
                .collect::<Vec<_>>()
                .join(", ")
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.into_iter()
            .map(|row| {
                let payment = PaymentRow {
                    id: row.try_get("id").map_err(DomainError::database)?,
                    user_id: row.try_get("user_id").map_err(DomainError::database)?,
                    amount: row.try_get("amount").map_err(DomainError::database)?,
                    payment_method: row
                        .try_get("payment_method")
                        .map_err(DomainError::database)?,
                    membership_type: row
                        .try_get("membership_type")
                        .map_err(DomainError::database)?,
                    payment_status: row
                        .try_get("payment_status")
                        .map_err(DomainError::database)?,
                    transaction_id: row
                        .try_get("transaction_id")
                        .map_err(DomainError::database)?,
                    subscription_start: row
                        .try_get("subscription_start")
                        .map_err(DomainError::database)?,
                    subscription_end: row
                        .try_get("subscription_end")
                        .map_err(DomainError::database)?,
                    notes: row.try_get("notes").map_err(DomainError::database)?,
                    payment_date: row.try_get("payment_date").map_err(DomainError::database)?,
                };
                Ok(PaymentWithMember {
                    payment: payment.try_into()?,
                    first_name: row.try_get("first_name").map_err(DomainError::database)?,
                    last_name: row.try_get("last_name").map_err(DomainError::database)?,
                    email: row.try_get("email").map_err(DomainError::database)?,
                })
            })
            .collect()
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<PaymentRecord>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE user_id = $1 ORDER BY payment_date DESC",
            PAYMENT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.into_iter().map(PaymentRecord::try_from).collect()
    }

    async fn summary(&self) -> Result<PaymentSummary, DomainError> {
        let row = sqlx::query(
            "SELECT \
             COALESCE(SUM(amount) FILTER (WHERE payment_status = 'paid'), 0)::float8 AS total_revenue, \
             COUNT(*) FILTER (WHERE payment_status = 'paid') AS paid_count, \
             COUNT(*) FILTER (WHERE payment_status = 'pending') AS pending_count \
             FROM payments",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(PaymentSummary {
            total_revenue: row
                .try_get("total_revenue")
                .map_err(DomainError::database)?,
            paid_count: row.try_get("paid_count").map_err(DomainError::database)?,
            pending_count: row
                .try_get("pending_count")
                .map_err(DomainError::database)?,
        })
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE transaction_id = $1",
            PAYMENT_COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.map(PaymentRecord::try_from).transpose()
    }

    async fn mark_state(&self, id: i64, state: PaymentState) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE payments SET payment_status = $1 WHERE id = $2")
            .bind(state.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                "Payment not found",
            ));
        }
        Ok(())
    }
}
