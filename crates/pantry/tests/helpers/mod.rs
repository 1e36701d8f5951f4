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

pub fn item(id: u64, name: &str) -> PantryItem {
    PantryItem {
        id,
        name: name.to_owned(),
        quantity: 1,
        expiration_date: None,
        notes: None,
    }
}

pub fn provider() -> MemoryProvider {
    MemoryProvider::new(Fixture {
        pantry: vec![item(1, "flour"), item(2, "sugar")],
        ..Default::default()
    })
}
