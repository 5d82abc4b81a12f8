//! Week plan structures, shopping lists, and tips.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dish::Dish;

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A single meal slot entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    pub ingredients: Vec<String>,
    pub portion: String,
}

impl Meal {
    pub fn from_dish(dish: &Dish) -> Self {
        Self {
            name: dish.name.clone(),
            calories: dish.calories,
            protein: dish.protein,
            carbs: dish.carbs,
            fats: dish.fats,
            fiber: dish.fiber,
            ingredients: dish.ingredients.clone(),
            portion: dish.portion.clone(),
        }
    }
}

/// Macro totals for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

/// One day of the week plan: five named slots plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: String,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snack1: Meal,
    pub snack2: Meal,
    pub totals: DayTotals,
}

impl DayPlan {
    pub fn meals(&self) -> [&Meal; 5] {
        [
            &self.breakfast,
            &self.lunch,
            &self.dinner,
            &self.snack1,
            &self.snack2,
        ]
    }

    /// Recompute totals from the five slots.
    pub fn sum_totals(&mut self) {
        let mut totals = DayTotals::default();
        for meal in [
            &self.breakfast,
            &self.lunch,
            &self.dinner,
            &self.snack1,
            &self.snack2,
        ] {
            totals.calories += meal.calories;
            totals.protein += meal.protein;
            totals.carbs += meal.carbs;
            totals.fats += meal.fats;
            totals.fiber += meal.fiber;
        }
        self.totals = totals;
    }
}

/// An aggregated shopping list line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub item: String,
    /// How many meals this week use the ingredient.
    pub count: usize,
}

/// The full generated plan payload persisted as `plan_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub week_plan: Vec<DayPlan>,
    pub shopping_list: Vec<ShoppingItem>,
    pub today_shopping_list: Vec<ShoppingItem>,
    pub meal_prep_tips: Vec<String>,
    pub nutrition_tips: Vec<String>,
}

/// Aggregate ingredients across the week, normalized to lowercase,
/// counted by the number of meals that use them.
pub fn shopping_list(week: &[DayPlan]) -> Vec<ShoppingItem> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for day in week {
        for meal in day.meals() {
            for ingredient in &meal.ingredients {
                let key = ingredient.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                *counts.entry(key).or_insert(0) += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(item, count)| ShoppingItem { item, count })
        .collect()
}

/// Shopping list for a single day (index into the week).
pub fn day_shopping_list(week: &[DayPlan], day_index: usize) -> Vec<ShoppingItem> {
    match week.get(day_index) {
        Some(day) => shopping_list(std::slice::from_ref(day)),
        None => Vec::new(),
    }
}

/// Meal-prep tips with heuristics keyed off what the week contains.
pub fn meal_prep_tips(week: &[DayPlan]) -> Vec<String> {
    let mut tips = vec![
        "Cook rice in batches and portion it for the week.".to_string(),
        "Prep aromatics (garlic, onion, ginger) in advance and refrigerate.".to_string(),
        "Portion proteins into meal-sized bags before freezing.".to_string(),
    ];

    let names: Vec<String> = week
        .iter()
        .flat_map(|d| d.meals().map(|m| m.name.to_lowercase()))
        .collect();

    if names
        .iter()
        .any(|n| n.contains("adobo") || n.contains("sinigang") || n.contains("kare"))
    {
        tips.push(
            "Stews like adobo and sinigang taste better the next day; cook double and reheat."
                .to_string(),
        );
    }
    if names.iter().any(|n| n.contains("torta") || n.contains("fried")) {
        tips.push(
            "For fried dishes, drain on a rack instead of paper towels to keep them crisp."
                .to_string(),
        );
    }
    tips
}

/// Nutrition tips keyed by the member's stated goal.
pub fn nutrition_tips(goal: &str) -> Vec<String> {
    let goal = goal.to_lowercase();
    if goal.contains("lose") || goal.contains("cut") {
        vec![
            "Keep a modest calorie deficit; the plan already favors broth-based dishes.".to_string(),
            "Fill half your plate with vegetables before adding rice.".to_string(),
            "Drink water before meals to manage portions.".to_string(),
        ]
    } else if goal.contains("gain") || goal.contains("muscle") || goal.contains("bulk") {
        vec![
            "Add an extra half-cup of rice to lunch and dinner on training days.".to_string(),
            "Aim for protein at every meal; eggs and milkfish are cheap options.".to_string(),
            "Eat within an hour after your workout.".to_string(),
        ]
    } else {
        vec![
            "Balance each meal: a palm of protein, a fist of vegetables, a cupped hand of rice."
                .to_string(),
            "Limit sugary drinks; calamansi juice without sugar is a good swap.".to_string(),
            "Consistency beats perfection; follow the plan most days.".to_string(),
        ]
    }
}
