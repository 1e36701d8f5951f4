#![allow(dead_code)]

use larder_shared::{
    mealplan::{Meal, MealSlot, MealType},
    provider::{Fixture, MemoryProvider},
    recipe::Recipe,
};
use time::macros::date;

pub fn recipe(id: u64, name: &str) -> Recipe {
    Recipe {
        id,
        name: name.to_owned(),
        ingredients: vec!["rice".into()],
        ..Default::default()
    }
}

pub fn provider() -> MemoryProvider {
    MemoryProvider::new(Fixture {
        user: "alice".to_owned(),
        recipes: vec![recipe(1, "Risotto"), recipe(2, "Pad Thai"), recipe(3, "Porridge")],
        meals: vec![
            Meal::template(1, recipe(1, "Risotto"), "alice"),
            Meal::template(2, recipe(2, "Pad Thai"), "alice"),
            Meal::template(3, recipe(2, "Pad Thai (quick)"), "alice"),
            Meal::scheduled(
                4,
                recipe(3, "Porridge"),
                MealSlot::new(date!(2024 - 03 - 05), MealType::Breakfast),
                "alice",
            ),
        ],
        ..Default::default()
    })
}
