//! Dish catalog port.

use async_trait::async_trait;

use crate::domain::mealplan::Dish;
use crate::domain::DomainError;

/// Port for the dish catalog. The postgres implementation falls back to
/// the built-in curated list when the table is empty.
#[async_trait]
pub trait DishCatalog: Send + Sync {
    async fn all(&self) -> Result<Vec<Dish>, DomainError>;
}
