#![allow(dead_code)]

use larder_shared::{
    pantry::PantryItem,
    provider::{Fixture, MemoryProvider},
    recipe::Recipe,
};

pub fn recipe(id: u64, name: &str, ingredients: &[&str]) -> Recipe {
    Recipe {
        id,
        name: name.to_owned(),
        ingredients: ingredients.iter().map(|i| (*i).into()).collect(),
        ..Default::default()
    }
}

pub fn pantry_item(id: u64, name: &str) -> PantryItem {
    PantryItem {
        id,
        name: name.to_owned(),
        quantity: 1,
        expiration_date: None,
        notes: None,
    }
}

pub fn selection(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn ids(recipes: &[Recipe]) -> Vec<u64> {
    recipes.iter().map(|r| r.id).collect()
}

pub fn provider() -> MemoryProvider {
    MemoryProvider::new(Fixture {
        recipes: vec![
            recipe(1, "Pancakes", &["flour", "egg", "milk"]),
            recipe(2, "Walnut Bread", &["flour", "walnuts"]),
            recipe(3, "Flatbread", &["flour", "water"]),
            recipe(4, "Omelette", &["egg", "butter"]),
            recipe(5, "Rice Bowl", &["rice", "flour"]),
            recipe(6, "Dumplings", &["flour", "water", "cabbage"]),
        ],
        pantry: vec![
            pantry_item(1, "flour"),
            pantry_item(2, "Walnuts"),
            pantry_item(3, "water"),
        ],
        ..Default::default()
    })
}
