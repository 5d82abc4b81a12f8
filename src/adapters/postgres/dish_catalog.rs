//! PostgreSQL dish catalog with a built-in fallback.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::mealplan::{Dish, BUILTIN_DISHES};
use crate::domain::DomainError;
use crate::ports::DishCatalog;

/// Dish catalog backed by the `filipino_dishes` table. Falls back to the
/// curated built-in list when the table is empty or unreadable, so the
/// meal planner always has dishes to work with.
pub struct PgDishCatalog {
    pool: PgPool,
}

impl PgDishCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DishCatalog for PgDishCatalog {
    async fn all(&self) -> Result<Vec<Dish>, DomainError> {
        let rows = sqlx::query(
            "SELECT name, category, calories, protein, carbs, fats, fiber, \
             ingredients, portion_size FROM filipino_dishes ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await;

        let rows = match rows {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => return Ok(BUILTIN_DISHES.clone()),
            Err(e) => {
                tracing::warn!("Dish table unavailable, using builtin catalog: {}", e);
                return Ok(BUILTIN_DISHES.clone());
            }
        };

        let mut dishes = Vec::with_capacity(rows.len());
        for row in rows {
            let ingredients_raw: String = row
                .try_get("ingredients")
                .map_err(DomainError::database)?;
            let ingredients: Vec<String> =
                serde_json::from_str(&ingredients_raw).unwrap_or_else(|_| {
                    ingredients_raw
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                });
            dishes.push(Dish {
                name: row.try_get("name").map_err(DomainError::database)?,
                category: row.try_get("category").map_err(DomainError::database)?,
                calories: row.try_get("calories").map_err(DomainError::database)?,
                protein: row.try_get("protein").map_err(DomainError::database)?,
                carbs: row.try_get("carbs").map_err(DomainError::database)?,
                fats: row.try_get("fats").map_err(DomainError::database)?,
                fiber: row.try_get("fiber").map_err(DomainError::database)?,
                ingredients,
                portion: row.try_get("portion_size").map_err(DomainError::database)?,
            });
        }
        Ok(dishes)
    }
}
