use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{IngredientCatalog, MealStore, PantryStore, ProfileStore, RecipeSearch};
use crate::{
    mealplan::{Meal, MealSlot},
    pantry::{NewPantryItem, PantryItem},
    recipe::{Ingredient, Recipe},
};

/// Data served by [`MemoryProvider`], loadable from a JSON file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub user: String,
    pub ingredients: Vec<Ingredient>,
    pub popular: Vec<Ingredient>,
    /// Ingredient names hidden by the diet-filtered endpoint.
    pub diet_excluded: Vec<String>,
    pub recipes: Vec<Recipe>,
    pub pantry: Vec<PantryItem>,
    pub allergens: Vec<String>,
    pub dietary_preference: Option<u64>,
    pub meals: Vec<Meal>,
}

/// In-process provider backed by a [`Fixture`].
#[derive(Debug, Default)]
pub struct MemoryProvider {
    data: Mutex<Fixture>,
    failing: AtomicBool,
}

impl MemoryProvider {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            data: Mutex::new(fixture),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every following call fail, or succeed again.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Fixture {
        self.data.lock().await.clone()
    }

    fn check(&self, operation: &str) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("{operation}: provider unavailable");
        }

        Ok(())
    }
}

fn next_id<'a>(ids: impl Iterator<Item = &'a u64>) -> u64 {
    ids.max().copied().unwrap_or(0) + 1
}

#[async_trait]
impl IngredientCatalog for MemoryProvider {
    async fn get_ingredients(
        &self,
        query: Option<&str>,
        diet_filtered: bool,
        limit: usize,
    ) -> anyhow::Result<Vec<Ingredient>> {
        self.check("get_ingredients")?;
        let data = self.data.lock().await;
        let excluded = data
            .diet_excluded
            .iter()
            .map(|n| crate::normalize_name(n))
            .collect::<Vec<_>>();
        let allowed = |i: &&Ingredient| !diet_filtered || !excluded.contains(&i.key());

        let query = query.map(crate::normalize_name).filter(|q| !q.is_empty());
        let ingredients = match query {
            Some(query) => data
                .ingredients
                .iter()
                .filter(|i| i.key().contains(&query))
                .filter(allowed)
                .take(limit)
                .cloned()
                .collect(),
            None => {
                let source = if data.popular.is_empty() {
                    &data.ingredients
                } else {
                    &data.popular
                };
                source.iter().filter(allowed).take(limit).cloned().collect()
            }
        };

        Ok(ingredients)
    }
}

#[async_trait]
impl RecipeSearch for MemoryProvider {
    async fn search_recipes_by_ingredients(
        &self,
        names: &[String],
    ) -> anyhow::Result<Vec<Recipe>> {
        self.check("search_recipes_by_ingredients")?;
        let data = self.data.lock().await;
        let names = names
            .iter()
            .map(|n| crate::normalize_name(n))
            .collect::<Vec<_>>();

        let mut scored = data
            .recipes
            .iter()
            .map(|r| {
                let score = if r.ingredients.is_empty() {
                    let description = r.description.to_lowercase();
                    names
                        .iter()
                        .filter(|n| !n.is_empty() && description.contains(n.as_str()))
                        .count()
                } else {
                    r.ingredients
                        .iter()
                        .filter(|i| names.contains(&i.key()))
                        .count()
                };
                (score, r)
            })
            .filter(|(score, _)| *score > 0)
            .collect::<Vec<_>>();

        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored.into_iter().map(|(_, r)| r.clone()).collect())
    }
}

#[async_trait]
impl PantryStore for MemoryProvider {
    async fn get_pantry(&self) -> anyhow::Result<Vec<PantryItem>> {
        self.check("get_pantry")?;
        Ok(self.data.lock().await.pantry.clone())
    }

    async fn add_pantry_item(&self, item: &NewPantryItem) -> anyhow::Result<PantryItem> {
        self.check("add_pantry_item")?;
        let mut data = self.data.lock().await;
        let item = PantryItem {
            id: next_id(data.pantry.iter().map(|p| &p.id)),
            name: item.name.to_owned(),
            quantity: item.quantity,
            expiration_date: item.expiration_date,
            notes: item.notes.to_owned(),
        };
        data.pantry.push(item.clone());

        Ok(item)
    }

    async fn update_pantry_item(&self, item: &PantryItem) -> anyhow::Result<PantryItem> {
        self.check("update_pantry_item")?;
        let mut data = self.data.lock().await;
        let Some(existing) = data.pantry.iter_mut().find(|p| p.id == item.id) else {
            bail!("pantry item {} not found", item.id);
        };
        *existing = item.clone();

        Ok(item.clone())
    }

    async fn remove_pantry_item(&self, id: u64) -> anyhow::Result<()> {
        self.check("remove_pantry_item")?;
        self.data.lock().await.pantry.retain(|p| p.id != id);

        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryProvider {
    async fn get_user_allergens(&self) -> anyhow::Result<Vec<String>> {
        self.check("get_user_allergens")?;
        Ok(self.data.lock().await.allergens.clone())
    }

    async fn get_dietary_preference(&self) -> anyhow::Result<Option<u64>> {
        self.check("get_dietary_preference")?;
        Ok(self.data.lock().await.dietary_preference)
    }
}

#[async_trait]
impl MealStore for MemoryProvider {
    async fn get_meals(&self, exclude_templates: bool) -> anyhow::Result<Vec<Meal>> {
        self.check("get_meals")?;
        Ok(self
            .data
            .lock()
            .await
            .meals
            .iter()
            .filter(|m| !exclude_templates || !m.is_template())
            .cloned()
            .collect())
    }

    async fn create_meal(&self, recipe_id: u64, slot: Option<MealSlot>) -> anyhow::Result<Meal> {
        self.check("create_meal")?;
        let mut data = self.data.lock().await;
        let recipe = data
            .recipes
            .iter()
            .chain(data.meals.iter().map(|m| &m.recipe))
            .find(|r| r.id == recipe_id)
            .cloned()
            .ok_or_else(|| anyhow!("recipe {recipe_id} not found"))?;

        let meal = Meal {
            id: next_id(data.meals.iter().map(|m| &m.id)),
            recipe,
            slot,
            user: data.user.to_owned(),
        };
        data.meals.push(meal.clone());

        Ok(meal)
    }

    async fn delete_meal(&self, id: u64) -> anyhow::Result<()> {
        self.check("delete_meal")?;
        self.data.lock().await.meals.retain(|m| m.id != id);

        Ok(())
    }
}
