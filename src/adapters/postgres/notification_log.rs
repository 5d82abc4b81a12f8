//! PostgreSQL implementation of the notification log.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::ports::NotificationLog;

/// Notification log backed by the `notification_logs` table.
pub struct PgNotificationLog {
    pool: PgPool,
}

impl PgNotificationLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationLog for PgNotificationLog {
    async fn was_notified_within(
        &self,
        user_id: i64,
        kind: &str,
        days: i64,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM notification_logs \
             WHERE user_id = $1 AND type = $2 \
             AND created_at > NOW() - ($3 || ' days')::interval) AS notified",
        )
        .bind(user_id)
        .bind(kind)
        .bind(days.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.try_get("notified").map_err(DomainError::database)
    }

    async fn record(&self, user_id: i64, kind: &str) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO notification_logs (user_id, type) VALUES ($1, $2)")
            .bind(user_id)
            .bind(kind)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;
        Ok(())
    }
}
