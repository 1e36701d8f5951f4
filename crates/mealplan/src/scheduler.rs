use std::collections::HashSet;

use larder_shared::{
    Result, invalid_assignment,
    mealplan::{Meal, MealSlot},
    not_found,
    provider::MealStore,
};
use time::Date;

use crate::{Assignment, normalize_title};

/// Meals fetched for the user, split into reusable templates and
/// calendar-bound instances.
#[derive(Clone, Debug, Default)]
pub struct MealScheduler {
    meals: Vec<Meal>,
}

impl MealScheduler {
    pub fn new(meals: Vec<Meal>) -> Self {
        Self { meals }
    }

    pub async fn load<P: MealStore + ?Sized>(provider: &P) -> Result<Self> {
        Ok(Self::new(provider.get_meals(false).await?))
    }

    /// Reloads every meal. On failure the cached meals stay.
    pub async fn refresh<P: MealStore + ?Sized>(&mut self, provider: &P) -> Result<()> {
        let meals = provider.get_meals(false).await?;
        self.replace(meals);

        Ok(())
    }

    pub fn replace(&mut self, meals: Vec<Meal>) {
        self.meals = meals;
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn get(&self, id: u64) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// Templates to offer, one per recipe title. Duplicates stay stored and
    /// deletable.
    pub fn templates(&self) -> Vec<&Meal> {
        let mut seen = HashSet::new();

        self.meals
            .iter()
            .filter(|m| m.is_template())
            .filter(|m| seen.insert(normalize_title(&m.recipe.name)))
            .collect()
    }

    pub fn scheduled(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter().filter(|m| !m.is_template())
    }

    /// Meals scheduled on `date`, breakfast first.
    pub fn scheduled_on(&self, date: Date) -> Vec<&Meal> {
        let mut meals = self
            .scheduled()
            .filter(|m| m.date() == Some(date))
            .collect::<Vec<_>>();
        meals.sort_by_key(|m| m.meal_type().map(|t| t.rank()));

        meals
    }

    pub fn week_meals(&self, days: &[Date]) -> Vec<(Date, Vec<&Meal>)> {
        days.iter()
            .map(|day| (*day, self.scheduled_on(*day)))
            .collect()
    }

    /// Saves `recipe_id` as a reusable template.
    pub async fn save_template<P: MealStore + ?Sized>(
        &mut self,
        provider: &P,
        recipe_id: u64,
    ) -> Result<Meal> {
        let meal = provider.create_meal(recipe_id, None).await?;
        tracing::info!(id = meal.id, recipe = %meal.recipe.name, "template saved");
        self.meals.push(meal.clone());

        Ok(meal)
    }

    /// Creates a new scheduled meal for `recipe_id`.
    pub async fn schedule<P: MealStore + ?Sized>(
        &mut self,
        provider: &P,
        recipe_id: u64,
        slot: MealSlot,
    ) -> Result<Meal> {
        let meal = provider.create_meal(recipe_id, Some(slot)).await?;
        tracing::info!(
            id = meal.id,
            recipe = %meal.recipe.name,
            date = %larder_shared::format_date(slot.date),
            meal_type = %slot.meal_type,
            "meal scheduled"
        );
        self.meals.push(meal.clone());

        Ok(meal)
    }

    /// Schedules the recipe of a template. The template stays untouched.
    pub async fn schedule_template<P: MealStore + ?Sized>(
        &mut self,
        provider: &P,
        template_id: u64,
        slot: MealSlot,
    ) -> Result<Meal> {
        let Some(template) = self.get(template_id) else {
            not_found!("meal {template_id}");
        };

        if !template.is_template() {
            invalid_assignment!("meal {template_id} is already scheduled");
        }

        let recipe_id = template.recipe.id;
        self.schedule(provider, recipe_id, slot).await
    }

    /// Applies a drop or a submitted form.
    pub async fn assign<P: MealStore + ?Sized>(
        &mut self,
        provider: &P,
        assignment: Assignment,
    ) -> Result<Meal> {
        self.schedule_template(provider, assignment.template_id, assignment.slot)
            .await
    }

    /// Removes one meal. Removing a template leaves meals scheduled from it.
    pub async fn delete<P: MealStore + ?Sized>(&mut self, provider: &P, id: u64) -> Result<()> {
        if self.get(id).is_none() {
            not_found!("meal {id}");
        }

        provider.delete_meal(id).await?;
        self.meals.retain(|m| m.id != id);
        tracing::info!(id, "meal deleted");

        Ok(())
    }
}
