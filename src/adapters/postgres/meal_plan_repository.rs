//! PostgreSQL implementation of meal plan persistence.
//!
//! Deployments migrated at different times, so the timestamp columns on
//! `meal_plans` may be missing. Every statement that touches them first
//! probes `information_schema.columns`; the probe result is cached for
//! the life of the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row};
use tokio::sync::OnceCell;

use crate::domain::{DomainError, ErrorCode};
use crate::ports::{MealPlanRepository, PlanSummary, StoredPlan};

/// Meal plan repository backed by `meal_plans` and
/// `user_meal_preferences`.
pub struct PgMealPlanRepository {
    pool: PgPool,
    has_generated_at: OnceCell<bool>,
    has_updated_at: OnceCell<bool>,
}

impl PgMealPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            has_generated_at: OnceCell::new(),
            has_updated_at: OnceCell::new(),
        }
    }

    async fn column_exists(&self, column: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM information_schema.columns \
             WHERE table_name = 'meal_plans' AND column_name = $1) AS present",
        )
        .bind(column)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.try_get("present").map_err(DomainError::database)
    }

    async fn generated_at_exists(&self) -> Result<bool, DomainError> {
        self.has_generated_at
            .get_or_try_init(|| self.column_exists("generated_at"))
            .await
            .copied()
    }

    async fn updated_at_exists(&self) -> Result<bool, DomainError> {
        self.has_updated_at
            .get_or_try_init(|| self.column_exists("updated_at"))
            .await
            .copied()
    }
}

#[async_trait]
impl MealPlanRepository for PgMealPlanRepository {
    async fn ensure_preference(
        &self,
        user_id: i64,
        preferences: &Value,
    ) -> Result<Option<i64>, DomainError> {
        let existing = sqlx::query("SELECT id FROM user_meal_preferences WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await;

        match existing {
            Ok(Some(row)) => {
                let id: i64 = row.try_get("id").map_err(DomainError::database)?;
                Ok(Some(id))
            }
            Ok(None) => {
                let inserted = sqlx::query(
                    "INSERT INTO user_meal_preferences (user_id, preferences) \
                     VALUES ($1, $2) RETURNING id",
                )
                .bind(user_id)
                .bind(preferences)
                .fetch_one(&self.pool)
                .await;
                match inserted {
                    Ok(row) => {
                        let id: i64 = row.try_get("id").map_err(DomainError::database)?;
                        Ok(Some(id))
                    }
                    Err(e) => {
                        tracing::warn!("Could not create meal preference row: {}", e);
                        Ok(None)
                    }
                }
            }
            Err(e) => {
                // The preferences table is optional in older deployments.
                tracing::warn!("Meal preference lookup failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn insert(
        &self,
        user_id: i64,
        preference_id: Option<i64>,
        name: &str,
        data: &Value,
    ) -> Result<i64, DomainError> {
        let query = if self.generated_at_exists().await? {
            "INSERT INTO meal_plans (user_id, preference_id, plan_name, plan_data, generated_at) \
             VALUES ($1, $2, $3, $4, NOW()) RETURNING id"
        } else {
            "INSERT INTO meal_plans (user_id, preference_id, plan_name, plan_data) \
             VALUES ($1, $2, $3, $4) RETURNING id"
        };

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(preference_id)
            .bind(name)
            .bind(data)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::database)?;

        row.try_get("id").map_err(DomainError::database)
    }

    async fn update(&self, plan_id: i64, name: &str, data: &Value) -> Result<(), DomainError> {
        let query = if self.updated_at_exists().await? {
            "UPDATE meal_plans SET plan_name = $1, plan_data = $2, updated_at = NOW() WHERE id = $3"
        } else {
            "UPDATE meal_plans SET plan_name = $1, plan_data = $2 WHERE id = $3"
        };

        let result = sqlx::query(query)
            .bind(name)
            .bind(data)
            .bind(plan_id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PlanNotFound, "Meal plan not found"));
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<PlanSummary>, DomainError> {
        let query = if self.generated_at_exists().await? {
            "SELECT id, plan_name, generated_at FROM meal_plans \
             WHERE user_id = $1 ORDER BY id DESC"
        } else {
            "SELECT id, plan_name, NULL::timestamptz AS generated_at FROM meal_plans \
             WHERE user_id = $1 ORDER BY id DESC"
        };

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::database)?;

        rows.into_iter()
            .map(|row| {
                Ok(PlanSummary {
                    id: row.try_get("id").map_err(DomainError::database)?,
                    name: row.try_get("plan_name").map_err(DomainError::database)?,
                    generated_at: row
                        .try_get::<Option<DateTime<Utc>>, _>("generated_at")
                        .map_err(DomainError::database)?,
                })
            })
            .collect()
    }

    async fn find(&self, plan_id: i64) -> Result<Option<StoredPlan>, DomainError> {
        let generated = if self.generated_at_exists().await? {
            "generated_at"
        } else {
            "NULL::timestamptz AS generated_at"
        };
        let updated = if self.updated_at_exists().await? {
            "updated_at"
        } else {
            "NULL::timestamptz AS updated_at"
        };
        let query = format!(
            "SELECT id, user_id, plan_name, plan_data, {}, {} FROM meal_plans WHERE id = $1",
            generated, updated
        );

        let row = sqlx::query(&query)
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::database)?;

        row.map(|row| {
            Ok(StoredPlan {
                id: row.try_get("id").map_err(DomainError::database)?,
                user_id: row.try_get("user_id").map_err(DomainError::database)?,
                name: row.try_get("plan_name").map_err(DomainError::database)?,
                data: row.try_get("plan_data").map_err(DomainError::database)?,
                generated_at: row
                    .try_get::<Option<DateTime<Utc>>, _>("generated_at")
                    .map_err(DomainError::database)?,
                updated_at: row
                    .try_get::<Option<DateTime<Utc>>, _>("updated_at")
                    .map_err(DomainError::database)?,
            })
        })
        .transpose()
    }

    async fn delete(&self, plan_id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM meal_plans WHERE id = $1")
            .bind(plan_id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PlanNotFound, "Meal plan not found"));
        }
        Ok(())
    }
}
