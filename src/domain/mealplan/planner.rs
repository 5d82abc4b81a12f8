//! Deterministic week planner and AI plan reconciliation.

use std::collections::HashSet;

use rand::Rng;
use serde_json::Value;

use super::dish::{find_dish, Dish};
use super::plan::{DayPlan, DayTotals, Meal, DAY_NAMES};

/// Picks dishes without repeating until the catalog is exhausted.
///
/// Every pick goes into a used set keyed by lowercased name; when no
/// unused dish remains the set is cleared and rotation starts over.
pub struct MealRotation<'a> {
    dishes: &'a [Dish],
    used: HashSet<String>,
}

impl<'a> MealRotation<'a> {
    pub fn new(dishes: &'a [Dish]) -> Self {
        Self {
            dishes,
            used: HashSet::new(),
        }
    }

    /// Mark a name as used without picking (for AI-chosen meals).
    pub fn mark_used(&mut self, name: &str) {
        self.used.insert(name.trim().to_lowercase());
    }

    /// Pick a random unused dish. Returns `None` only on an empty catalog.
    pub fn pick(&mut self, rng: &mut impl Rng) -> Option<&'a Dish> {
        if self.dishes.is_empty() {
            return None;
        }
        let mut candidates: Vec<&Dish> = self
            .dishes
            .iter()
            .filter(|d| !self.used.contains(&d.name.to_lowercase()))
            .collect();
        if candidates.is_empty() {
            // Catalog exhausted; start the rotation over.
            self.used.clear();
            candidates = self.dishes.iter().collect();
        }
        let dish = candidates[rng.gen_range(0..candidates.len())];
        self.used.insert(dish.name.to_lowercase());
        Some(dish)
    }
}

fn build_day(day: &str, rotation: &mut MealRotation<'_>, rng: &mut impl Rng) -> Option<DayPlan> {
    let mut pick = || rotation.pick(rng).map(Meal::from_dish);
    let mut plan = DayPlan {
        day: day.to_string(),
        breakfast: pick()?,
        lunch: pick()?,
        dinner: pick()?,
        snack1: pick()?,
        snack2: pick()?,
        totals: DayTotals::default(),
    };
    plan.sum_totals();
    Some(plan)
}

/// Generate a full 7-day plan from the catalog rotation.
pub fn generate_week_plan(dishes: &[Dish], rng: &mut impl Rng) -> Option<Vec<DayPlan>> {
    let mut rotation = MealRotation::new(dishes);
    DAY_NAMES
        .iter()
        .map(|day| build_day(day, &mut rotation, rng))
        .collect()
}

/// Extract a JSON object from raw model output, tolerating code fences
/// and prose around the payload.
pub fn extract_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        return Some(value);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

fn meal_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("name").and_then(|n| n.as_str()).map(String::from),
        _ => None,
    }
}

fn resolve_meal(
    day: &Value,
    slot: &str,
    dishes: &[Dish],
    rotation: &mut MealRotation<'_>,
    rng: &mut impl Rng,
) -> Option<Meal> {
    if let Some(name) = day.get(slot).and_then(meal_name) {
        if let Some(dish) = find_dish(dishes, &name) {
            rotation.mark_used(&dish.name);
            return Some(Meal::from_dish(dish));
        }
    }
    // Unknown or missing name: fill from the rotation instead.
    rotation.pick(rng).map(Meal::from_dish)
}

/// Reconcile an AI-produced week plan against the catalog.
///
/// The payload must contain a 7-entry `weekPlan` array; each named meal
/// is matched case-insensitively against the catalog so the macros we
/// report are ours, not the model's. Unknown names fall back to the
/// rotation. Returns `None` when the structure is unusable, in which
/// case the caller generates the deterministic plan instead.
pub fn reconcile_ai_plan(
    payload: &Value,
    dishes: &[Dish],
    rng: &mut impl Rng,
) -> Option<Vec<DayPlan>> {
    let week = payload.get("weekPlan")?.as_array()?;
    if week.len() != DAY_NAMES.len() {
        return None;
    }

    let mut rotation = MealRotation::new(dishes);
    let mut days = Vec::with_capacity(DAY_NAMES.len());
    for (i, entry) in week.iter().enumerate() {
        let day_name = entry
            .get("day")
            .and_then(|d| d.as_str())
            .unwrap_or(DAY_NAMES[i])
            .to_string();
        let mut plan = DayPlan {
            day: day_name,
            breakfast: resolve_meal(entry, "breakfast", dishes, &mut rotation, rng)?,
            lunch: resolve_meal(entry, "lunch", dishes, &mut rotation, rng)?,
            dinner: resolve_meal(entry, "dinner", dishes, &mut rotation, rng)?,
            snack1: resolve_meal(entry, "snack1", dishes, &mut rotation, rng)?,
            snack2: resolve_meal(entry, "snack2", dishes, &mut rotation, rng)?,
            totals: DayTotals::default(),
        };
        plan.sum_totals();
        days.push(plan);
    }
    Some(days)
}

/// Pick one replacement meal avoiding the given names. When everything
/// is excluded the pick is labelled as an alternate serving.
pub fn pick_replacement(dishes: &[Dish], exclude: &[String], rng: &mut impl Rng) -> Option<Meal> {
    if dishes.is_empty() {
        return None;
    }
    let excluded: HashSet<String> = exclude.iter().map(|n| n.trim().to_lowercase()).collect();
    let candidates: Vec<&Dish> = dishes
        .iter()
        .filter(|d| !excluded.contains(&d.name.to_lowercase()))
        .collect();

    if candidates.is_empty() {
        let dish = &dishes[rng.gen_range(0..dishes.len())];
        let mut meal = Meal::from_dish(dish);
        meal.name = format!("{} (Alt)", meal.name);
        return Some(meal);
    }
    Some(Meal::from_dish(candidates[rng.gen_range(0..candidates.len())]))
}

/// Build the chat prompt asking the model for a week plan constrained to
/// the catalog.
pub fn build_prompt(goal: &str, restrictions: &[String], dishes: &[Dish]) -> String {
    let catalog: Vec<Value> = dishes
        .iter()
        .map(|d| {
            serde_json::json!({
                "name": d.name,
                "calories": d.calories,
                "protein": d.protein,
            })
        })
        .collect();
    let restrictions = if restrictions.is_empty() {
        "none".to_string()
    } else {
        restrictions.join(", ")
    };

    format!(
        "You are a Filipino nutrition coach. Create a 7-day meal plan for a gym member.\n\
         Goal: {goal}\n\
         Dietary restrictions: {restrictions}\n\
         Choose meals ONLY from this list:\n{catalog}\n\
         Respond with JSON only, shaped as:\n\
         {{\"weekPlan\":[{{\"day\":\"Monday\",\"breakfast\":\"<dish name>\",\"lunch\":\"<dish name>\",\
         \"dinner\":\"<dish name>\",\"snack1\":\"<dish name>\",\"snack2\":\"<dish name>\"}}, ...]}}\n\
         The weekPlan array must contain exactly 7 days, Monday through Sunday, \
         and no dish may repeat within the week.",
        goal = goal,
        restrictions = restrictions,
        catalog = serde_json::to_string(&catalog).unwrap_or_default(),
    )
}
