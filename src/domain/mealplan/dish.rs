//! Dish catalog types and the built-in curated list.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A dish with verified nutrition facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    pub ingredients: Vec<String>,
    pub portion: String,
}

fn dish(
    name: &str,
    category: &str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    fiber: f64,
    portion: &str,
    ingredients: &[&str],
) -> Dish {
    Dish {
        name: name.to_string(),
        category: category.to_string(),
        calories,
        protein,
        carbs,
        fats,
        fiber,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        portion: portion.to_string(),
    }
}

/// Curated Filipino dishes with verified macros. Used whenever the
/// `filipino_dishes` table is empty or unreachable.
pub static BUILTIN_DISHES: Lazy<Vec<Dish>> = Lazy::new(|| {
    vec![
        dish(
            "Chicken Adobo",
            "main",
            280.0, 28.0, 6.0, 15.0, 0.5,
            "1 cup with sauce",
            &["chicken thigh", "soy sauce", "vinegar", "garlic", "bay leaf", "peppercorn"],
        ),
        dish(
            "Sinigang na Baboy",
            "main",
            310.0, 24.0, 14.0, 18.0, 3.0,
            "1.5 cups with broth",
            &["pork belly", "tamarind", "kangkong", "radish", "tomato", "string beans"],
        ),
        dish(
            "Tinolang Manok",
            "main",
            220.0, 26.0, 9.0, 9.0, 2.0,
            "1.5 cups with broth",
            &["chicken", "green papaya", "ginger", "malunggay leaves", "fish sauce"],
        ),
        dish(
            "Grilled Bangus",
            "main",
            240.0, 30.0, 2.0, 12.0, 0.0,
            "1 medium fillet",
            &["milkfish", "calamansi", "garlic", "onion", "tomato"],
        ),
        dish(
            "Pinakbet",
            "vegetable",
            160.0, 7.0, 18.0, 7.0, 6.0,
            "1 cup",
            &["squash", "eggplant", "okra", "bitter melon", "string beans", "shrimp paste"],
        ),
        dish(
            "Ginisang Monggo",
            "vegetable",
            210.0, 14.0, 28.0, 5.0, 8.0,
            "1 cup",
            &["mung beans", "garlic", "onion", "tomato", "malunggay leaves", "fish sauce"],
        ),
        dish(
            "Tortang Talong",
            "main",
            190.0, 10.0, 9.0, 13.0, 3.0,
            "1 piece",
            &["eggplant", "egg", "garlic", "onion"],
        ),
        dish(
            "Arroz Caldo",
            "breakfast",
            260.0, 15.0, 36.0, 6.0, 1.0,
            "1.5 cups",
            &["rice", "chicken", "ginger", "garlic", "safflower", "green onion", "egg"],
        ),
        dish(
            "Champorado",
            "breakfast",
            230.0, 5.0, 45.0, 4.0, 2.0,
            "1 cup",
            &["glutinous rice", "cocoa", "milk"],
        ),
        dish(
            "Pandesal with Egg",
            "breakfast",
            270.0, 12.0, 34.0, 9.0, 1.5,
            "2 rolls with 1 egg",
            &["pandesal", "egg"],
        ),
        dish(
            "Lugaw with Tokwa",
            "breakfast",
            240.0, 11.0, 38.0, 5.0, 1.5,
            "1.5 cups",
            &["rice", "ginger", "tofu", "garlic", "green onion"],
        ),
        dish(
            "Chopsuey",
            "vegetable",
            180.0, 12.0, 14.0, 8.0, 4.0,
            "1.5 cups",
            &["cabbage", "carrot", "cauliflower", "snow peas", "chicken", "shrimp", "quail egg"],
        ),
        dish(
            "Bicol Express",
            "main",
            340.0, 20.0, 8.0, 26.0, 2.0,
            "1 cup",
            &["pork", "coconut milk", "chili", "shrimp paste", "garlic", "onion"],
        ),
        dish(
            "Laing",
            "vegetable",
            220.0, 8.0, 10.0, 17.0, 4.0,
            "1 cup",
            &["taro leaves", "coconut milk", "chili", "dried fish", "garlic"],
        ),
        dish(
            "Kare-Kare",
            "main",
            380.0, 25.0, 16.0, 24.0, 4.0,
            "1.5 cups with sauce",
            &["oxtail", "peanut butter", "banana heart", "eggplant", "string beans", "bagoong"],
        ),
        dish(
            "Ginataang Gulay",
            "vegetable",
            200.0, 6.0, 16.0, 13.0, 5.0,
            "1 cup",
            &["squash", "string beans", "coconut milk", "shrimp", "garlic"],
        ),
        dish(
            "Fish Tinola",
            "main",
            190.0, 24.0, 7.0, 7.0, 1.5,
            "1.5 cups with broth",
            &["tilapia", "ginger", "tomato", "mustard greens", "fish sauce"],
        ),
        dish(
            "Ensaladang Talong",
            "snack",
            90.0, 2.0, 10.0, 5.0, 3.5,
            "1 cup",
            &["grilled eggplant", "tomato", "onion", "vinegar"],
        ),
        dish(
            "Boiled Saba with Peanuts",
            "snack",
            180.0, 5.0, 32.0, 5.0, 4.0,
            "2 pieces with 2 tbsp peanuts",
            &["saba banana", "peanuts"],
        ),
        dish(
            "Fresh Lumpia",
            "snack",
            160.0, 7.0, 20.0, 6.0, 3.0,
            "1 roll",
            &["lumpia wrapper", "ubod", "carrot", "lettuce", "peanut sauce", "ground pork"],
        ),
    ]
});

/// Case-insensitive lookup by dish name.
pub fn find_dish<'a>(dishes: &'a [Dish], name: &str) -> Option<&'a Dish> {
    let needle = name.trim().to_lowercase();
    dishes.iter().find(|d| d.name.to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_twenty_dishes() {
        assert_eq!(BUILTIN_DISHES.len(), 20);
    }

    #[test]
    fn builtin_names_are_unique() {
        let mut names: Vec<String> = BUILTIN_DISHES.iter().map(|d| d.name.to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_DISHES.len());
    }

    #[test]
    fn every_dish_has_macros_and_ingredients() {
        for dish in BUILTIN_DISHES.iter() {
            assert!(dish.calories > 0.0, "{} has no calories", dish.name);
            assert!(!dish.ingredients.is_empty(), "{} has no ingredients", dish.name);
            assert!(!dish.portion.is_empty());
        }
    }

    #[test]
    fn find_dish_is_case_insensitive() {
        let found = find_dish(&BUILTIN_DISHES, "chicken ADOBO").unwrap();
        assert_eq!(found.name, "Chicken Adobo");
        assert!(find_dish(&BUILTIN_DISHES, "Sisig").is_none());
    }
}
