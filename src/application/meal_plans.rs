//! Weekly meal plan generation.
//!
//! Plans come from the AI provider when it is configured and behaving;
//! any failure along that path drops silently to the deterministic
//! rotation so the endpoint always returns a full week.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde_json::Value;

use crate::domain::mealplan::{
    build_prompt, extract_json, generate_week_plan, pick_replacement, reconcile_ai_plan, Dish,
    GeneratedPlan, Meal,
};
use crate::domain::{CurrentUser, DomainError, ErrorCode};
use crate::ports::{AiError, DishCatalog, MealPlanAi, MealPlanRepository, PlanSummary, StoredPlan};

/// Where a generated plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Ai,
    Fallback,
}

impl PlanSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSource::Ai => "ai",
            PlanSource::Fallback => "fallback",
        }
    }
}

/// A generated plan plus how it was produced and whether it persisted.
pub struct GenerateOutcome {
    pub plan: GeneratedPlan,
    pub source: PlanSource,
    pub saved_plan_id: Option<i64>,
}

/// Orchestrates plan generation, single-meal regeneration, and the
/// saved-plan CRUD surface.
pub struct MealPlanService {
    catalog: Arc<dyn DishCatalog>,
    ai: Arc<dyn MealPlanAi>,
    plans: Arc<dyn MealPlanRepository>,
}

impl MealPlanService {
    pub fn new(
        catalog: Arc<dyn DishCatalog>,
        ai: Arc<dyn MealPlanAi>,
        plans: Arc<dyn MealPlanRepository>,
    ) -> Self {
        Self { catalog, ai, plans }
    }

    /// Generate a full week plan and try to persist it.
    ///
    /// Persistence failures degrade to `saved_plan_id: None` rather than
    /// failing the request; the client still gets the plan.
    pub async fn generate(
        &self,
        user_id: i64,
        goal: &str,
        restrictions: &[String],
        plan_name: Option<String>,
    ) -> Result<GenerateOutcome, DomainError> {
        let dishes = self.catalog.all().await?;
        if dishes.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Dish catalog is empty",
            ));
        }

        let (week_plan, source) = self.build_week(goal, restrictions, &dishes).await?;
        let plan = Self::assemble(week_plan, goal);

        let name = plan_name.unwrap_or_else(|| {
            format!("{} Plan - {}", capitalize(goal), Utc::now().format("%b %d"))
        });
        let saved_plan_id = self
            .persist(user_id, goal, restrictions, &name, &plan)
            .await;

        Ok(GenerateOutcome {
            plan,
            source,
            saved_plan_id,
        })
    }

    async fn build_week(
        &self,
        goal: &str,
        restrictions: &[String],
        dishes: &[Dish],
    ) -> Result<(Vec<crate::domain::mealplan::DayPlan>, PlanSource), DomainError> {
        if self.ai.is_available() {
            let prompt = build_prompt(goal, restrictions, dishes);
            match self.ai.complete(&prompt).await {
                Ok(text) => {
                    let reconciled = extract_json(&text).and_then(|payload| {
                        let mut rng = rand::thread_rng();
                        reconcile_ai_plan(&payload, dishes, &mut rng)
                    });
                    match reconciled {
                        Some(week) => return Ok((week, PlanSource::Ai)),
                        None => {
                            tracing::warn!("AI response did not yield a usable week plan");
                        }
                    }
                }
                Err(AiError::Disabled) => {}
                Err(e) => tracing::warn!("AI plan generation failed: {}", e),
            }
        }

        let week = {
            let mut rng = rand::thread_rng();
            generate_week_plan(dishes, &mut rng)
        };
        week.map(|w| (w, PlanSource::Fallback)).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Could not assemble a week plan")
        })
    }

    fn assemble(week_plan: Vec<crate::domain::mealplan::DayPlan>, goal: &str) -> GeneratedPlan {
        let shopping_list = crate::domain::mealplan::shopping_list(&week_plan);
        // Monday-indexed; the plan's days are laid out Monday first.
        let today = Utc::now().weekday().num_days_from_monday() as usize;
        let today_shopping_list = crate::domain::mealplan::day_shopping_list(&week_plan, today);
        let meal_prep_tips = crate::domain::mealplan::meal_prep_tips(&week_plan);
        let nutrition_tips = crate::domain::mealplan::nutrition_tips(goal);

        GeneratedPlan {
            week_plan,
            shopping_list,
            today_shopping_list,
            meal_prep_tips,
            nutrition_tips,
        }
    }

    async fn persist(
        &self,
        user_id: i64,
        goal: &str,
        restrictions: &[String],
        name: &str,
        plan: &GeneratedPlan,
    ) -> Option<i64> {
        let preference = serde_json::json!({
            "goal": goal,
            "restrictions": restrictions,
        });
        let data = match serde_json::to_value(plan) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Could not serialize plan for storage: {}", e);
                return None;
            }
        };

        let preference_id = match self.plans.ensure_preference(user_id, &preference).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Could not store meal preference: {}", e);
                None
            }
        };
        match self.plans.insert(user_id, preference_id, name, &data).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Could not save generated plan: {}", e);
                None
            }
        }
    }

    /// Replace a single meal. Tries the AI for a suggestion when it is
    /// available, otherwise (or when the suggestion is unusable) picks a
    /// rotation replacement. The current dish and every name in
    /// `exclude_meal_names` are avoided on both paths.
    pub async fn regenerate_meal(
        &self,
        current_meal: &str,
        exclude_meal_names: &[String],
        goal: &str,
    ) -> Result<(Meal, PlanSource), DomainError> {
        let dishes = self.catalog.all().await?;
        if dishes.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Dish catalog is empty",
            ));
        }

        let is_excluded = |name: &str| {
            name.eq_ignore_ascii_case(current_meal)
                || exclude_meal_names
                    .iter()
                    .any(|e| e.trim().eq_ignore_ascii_case(name))
        };

        if self.ai.is_available() {
            let names: Vec<&str> = dishes
                .iter()
                .map(|d| d.name.as_str())
                .filter(|n| !is_excluded(n))
                .collect();
            let prompt = format!(
                "Pick one Filipino dish for a {} goal to replace \"{}\". \
                 Respond with only the dish name, chosen from: {}",
                goal,
                current_meal,
                names.join(", ")
            );
            if let Ok(text) = self.ai.complete(&prompt).await {
                let suggestion = text.trim().trim_matches('"');
                if let Some(dish) = dishes
                    .iter()
                    .find(|d| d.name.eq_ignore_ascii_case(suggestion))
                {
                    if !is_excluded(&dish.name) {
                        return Ok((Meal::from_dish(dish), PlanSource::Ai));
                    }
                }
                tracing::debug!("AI replacement suggestion unusable; using rotation");
            }
        }

        let mut exclude: Vec<String> = exclude_meal_names.to_vec();
        exclude.push(current_meal.to_string());
        let meal = {
            let mut rng = rand::thread_rng();
            pick_replacement(&dishes, &exclude, &mut rng)
        };
        meal.map(|m| (m, PlanSource::Fallback)).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "No replacement dish available")
        })
    }

    /// Save a client-assembled plan document, creating a new row or
    /// updating an existing one when a plan id is given.
    pub async fn save(
        &self,
        user: &CurrentUser,
        plan_id: Option<i64>,
        name: &str,
        data: &Value,
    ) -> Result<i64, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Plan name is required"));
        }
        match plan_id {
            Some(plan_id) => {
                self.get(user, plan_id).await?;
                self.plans.update(plan_id, name, data).await?;
                Ok(plan_id)
            }
            None => {
                let preference_id = self
                    .plans
                    .ensure_preference(user.id, &serde_json::json!({}))
                    .await
                    .unwrap_or(None);
                self.plans.insert(user.id, preference_id, name, data).await
            }
        }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<PlanSummary>, DomainError> {
        self.plans.list_for_user(user_id).await
    }

    /// Fetch one saved plan. Owners and admins only; anyone else gets a
    /// 403 rather than a 404 so the distinction is visible to clients.
    pub async fn get(&self, user: &CurrentUser, plan_id: i64) -> Result<StoredPlan, DomainError> {
        let plan = self
            .plans
            .find(plan_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PlanNotFound, "Meal plan not found"))?;
        if plan.user_id != user.id && !user.is_admin() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "You do not have access to this meal plan",
            ));
        }
        Ok(plan)
    }

    pub async fn delete(&self, user: &CurrentUser, plan_id: i64) -> Result<(), DomainError> {
        self.get(user, plan_id).await?;
        self.plans.delete(plan_id).await
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
