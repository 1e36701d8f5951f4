#![allow(dead_code)]

use std::sync::Arc;

use larder_shared::{
    AllergenIndex,
    provider::{Fixture, MemoryProvider},
    recipe::Ingredient,
};
use rand::{SeedableRng, rngs::StdRng};

pub fn ingredients(names: &[&str]) -> Vec<Ingredient> {
    names.iter().map(|n| Ingredient::new(*n)).collect()
}

pub fn names(tiles: &[larder_catalog::Tile]) -> Vec<&str> {
    tiles.iter().map(|t| t.name.as_str()).collect()
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn nuts() -> AllergenIndex {
    AllergenIndex::expand(["nuts"])
}

pub fn provider() -> Arc<MemoryProvider> {
    Arc::new(MemoryProvider::new(Fixture {
        ingredients: ingredients(&[
            "walnut", "peanuts", "pecan", "basil", "butter", "carrot", "walnut oil", "wasabi",
        ]),
        popular: ingredients(&["peanuts", "egg", "flour", "sugar"]),
        diet_excluded: vec!["butter".to_owned()],
        ..Default::default()
    }))
}
