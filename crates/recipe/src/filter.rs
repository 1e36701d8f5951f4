use larder_shared::{AllergenIndex, recipe::Recipe};

use crate::ingredient_names;

/// True when no ingredient name and no explicit allergen tag of `recipe`
/// matches `allergens`.
pub fn is_recipe_safe(allergens: &AllergenIndex, recipe: &Recipe) -> bool {
    allergens.is_safe(ingredient_names(recipe)) && allergens.is_safe(&recipe.allergens)
}

/// Client-side re-check of search results. The recipe endpoint may filter
/// allergens poorly or not at all.
pub fn defensive_filter(allergens: &AllergenIndex, recipes: Vec<Recipe>) -> Vec<Recipe> {
    if allergens.is_empty() {
        return recipes;
    }

    let before = recipes.len();
    let safe = recipes
        .into_iter()
        .filter(|r| is_recipe_safe(allergens, r))
        .collect::<Vec<_>>();

    if safe.len() < before {
        tracing::debug!(
            removed = before - safe.len(),
            kept = safe.len(),
            "defensive filter removed allergenic recipes"
        );
    }

    safe
}
