//! Meal planning domain: dish catalog, deterministic week planner, and
//! reconciliation of AI-suggested plans against the catalog.

pub mod dish;
pub mod plan;
pub mod planner;

pub use dish::{find_dish, Dish, BUILTIN_DISHES};
pub use plan::{
    day_shopping_list, meal_prep_tips, nutrition_tips, shopping_list, DayPlan, DayTotals,
    GeneratedPlan, Meal, ShoppingItem, DAY_NAMES,
};
pub use planner::{
    build_prompt, extract_json, generate_week_plan, pick_replacement, reconcile_ai_plan,
    MealRotation,
};
