use std::collections::HashSet;

use larder_shared::{normalize_name, pantry::PantryItem, recipe::Recipe};

/// Ingredients of `recipe` the pantry does not hold, compared
/// case-insensitively. Keeps recipe order and drops repeated names.
pub fn missing(recipe: &Recipe, pantry: &[PantryItem]) -> Vec<String> {
    let held = pantry.iter().map(|p| p.key()).collect::<HashSet<_>>();
    let mut seen = HashSet::new();

    larder_recipe::ingredient_names(recipe)
        .into_iter()
        .filter(|name| {
            let key = normalize_name(name);
            !held.contains(&key) && seen.insert(key)
        })
        .collect()
}
