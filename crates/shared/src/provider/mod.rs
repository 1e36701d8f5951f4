//! Externally owned operations the core consumes.
//!
//! Every call may fail; callers degrade to their last known state instead of
//! propagating the failure as a crash.

mod memory;

pub use memory::*;

use async_trait::async_trait;

use crate::{
    mealplan::{Meal, MealSlot},
    pantry::{NewPantryItem, PantryItem},
    recipe::{Ingredient, Recipe},
};

#[async_trait]
pub trait IngredientCatalog: Send + Sync {
    /// Candidate ingredients for `query`, or the popular list when `query` is
    /// `None`. `diet_filtered` selects the endpoint honouring the user's
    /// dietary preference.
    async fn get_ingredients(
        &self,
        query: Option<&str>,
        diet_filtered: bool,
        limit: usize,
    ) -> anyhow::Result<Vec<Ingredient>>;
}

#[async_trait]
pub trait RecipeSearch: Send + Sync {
    async fn search_recipes_by_ingredients(&self, names: &[String])
    -> anyhow::Result<Vec<Recipe>>;
}

#[async_trait]
pub trait PantryStore: Send + Sync {
    async fn get_pantry(&self) -> anyhow::Result<Vec<PantryItem>>;

    async fn add_pantry_item(&self, item: &NewPantryItem) -> anyhow::Result<PantryItem>;

    async fn update_pantry_item(&self, item: &PantryItem) -> anyhow::Result<PantryItem>;

    async fn remove_pantry_item(&self, id: u64) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_user_allergens(&self) -> anyhow::Result<Vec<String>>;

    async fn get_dietary_preference(&self) -> anyhow::Result<Option<u64>>;
}

#[async_trait]
pub trait MealStore: Send + Sync {
    async fn get_meals(&self, exclude_templates: bool) -> anyhow::Result<Vec<Meal>>;

    /// Creates a template when `slot` is `None`, a scheduled meal otherwise.
    async fn create_meal(&self, recipe_id: u64, slot: Option<MealSlot>) -> anyhow::Result<Meal>;

    async fn delete_meal(&self, id: u64) -> anyhow::Result<()>;
}

/// Every provider operation behind one handle.
pub trait Provider: IngredientCatalog + RecipeSearch + PantryStore + ProfileStore + MealStore {}

impl<T> Provider for T where
    T: IngredientCatalog + RecipeSearch + PantryStore + ProfileStore + MealStore
{
}
