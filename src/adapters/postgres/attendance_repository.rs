//! PostgreSQL implementation of attendance persistence.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Row};

use crate::domain::DomainError;
use crate::ports::{AttendanceRepository, CheckIn, CheckInWithMember};

/// Attendance repository backed by the `attendance` table.
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CheckInRow {
    id: i64,
    user_id: i64,
    check_in_time: DateTime<Utc>,
    location: String,
}

impl From<CheckInRow> for CheckIn {
    fn from(row: CheckInRow) -> Self {
        CheckIn {
            id: row.id,
            user_id: row.user_id,
            check_in_time: row.check_in_time,
            location: row.location,
        }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    async fn has_checked_in_on(&self, user_id: i64, day: NaiveDate) -> Result<bool, DomainError> {
        // Day expression must match the attendance_user_day_key index,
        // independent of the session time zone.
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM attendance \
             WHERE user_id = $1 \
             AND (check_in_time AT TIME ZONE 'UTC')::date = $2) AS present",
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.try_get("present").map_err(DomainError::database)
    }

    async fn insert(
        &self,
        user_id: i64,
        check_in_time: DateTime<Utc>,
        location: &str,
    ) -> Result<i64, DomainError> {
        let row = sqlx::query(
            "INSERT INTO attendance (user_id, check_in_time, location, status) \
             VALUES ($1, $2, $3, 'checked_in') RETURNING id",
        )
        .bind(user_id)
        .bind(check_in_time)
        .bind(location)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.try_get("id").map_err(DomainError::database)
    }

    async fn history_for_user(&self, user_id: i64) -> Result<Vec<CheckIn>, DomainError> {
        let rows: Vec<CheckInRow> = sqlx::query_as(
            "SELECT id, user_id, check_in_time, location FROM attendance \
             WHERE user_id = $1 ORDER BY check_in_time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(rows.into_iter().map(CheckIn::from).collect())
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM attendance WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::database)?;

        row.try_get("total").map_err(DomainError::database)
    }

    async fn list_for_day(&self, day: NaiveDate) -> Result<Vec<CheckInWithMember>, DomainError> {
        let rows = sqlx::query(
            "SELECT a.id, a.user_id, a.check_in_time, a.location, \
             u.first_name, u.last_name, u.email \
             FROM attendance a JOIN users u ON u.id = a.user_id \
             WHERE (a.check_in_time AT TIME ZONE 'UTC')::date = $1 \
             ORDER BY a.check_in_time DESC",
        )
        .bind(day)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.into_iter()
            .map(|row| {
                Ok(CheckInWithMember {
                    check_in: CheckIn {
                        id: row.try_get("id").map_err(DomainError::database)?,
                        user_id: row.try_get("user_id").map_err(DomainError::database)?,
                        check_in_time: row
                            .try_get("check_in_time")
                            .map_err(DomainError::database)?,
                        location: row.try_get("location").map_err(DomainError::database)?,
                    },
                    first_name: row.try_get("first_name").map_err(DomainError::database)?,
                    last_name: row.try_get("last_name").map_err(DomainError::database)?,
                    email: row.try_get("email").map_err(DomainError::database)?,
                })
            })
            .collect()
    }
}
