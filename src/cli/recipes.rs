use std::io::Write;

use larder_pantry::Pantry;
use larder_recipe::MatchSession;
use larder_shared::{
    Result,
    provider::{MealStore, Provider, RecipeSearch},
    recipe::Recipe,
};

use crate::App;

pub async fn search(
    app: &mut App,
    ingredients: Vec<String>,
    from_pantry: bool,
    page: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let allergens = app.allergens().await;
    let mut session = MatchSession::new(allergens).with_page_size(app.config.recipes.page_size);

    let result = if from_pantry {
        session.search_from_pantry(app.provider.as_ref()).await
    } else {
        session.search(app.provider.as_ref(), &ingredients).await
    };

    if let Some(status) = app.notices.report(result) {
        if let Some(notice) = status.notice() {
            app.notices.push(notice);
        }
    }

    if session.total() == 0 {
        return Ok(());
    }

    session.go_to(page);
    writeln!(
        out,
        "Page {}/{} ({} recipes)",
        session.page(),
        session.total_pages(),
        session.total()
    )?;

    for recipe in session.page_items() {
        write_recipe(recipe, out)?;
    }

    Ok(())
}

pub async fn missing(
    app: &mut App,
    recipe_id: u64,
    with: Vec<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let result = Pantry::load(app.provider.as_ref()).await;
    let Some(pantry) = app.notices.report(result) else {
        return Ok(());
    };

    let result = find_recipe(app.provider.as_ref(), recipe_id, &with, &pantry).await;
    let Some(recipe) = app.notices.report(result) else {
        return Ok(());
    };

    let missing = larder_pantry::missing(&recipe, pantry.items());
    if missing.is_empty() {
        writeln!(out, "You have everything for {}.", recipe.name)?;
        return Ok(());
    }

    writeln!(out, "Missing for {}:", recipe.name)?;
    for name in missing {
        writeln!(out, "  - {name}")?;
    }

    Ok(())
}

/// Looks a recipe up among the recipes matching `with` (or the pantry when
/// `with` is empty), then among saved meals.
pub async fn find_recipe(
    provider: &dyn Provider,
    recipe_id: u64,
    with: &[String],
    pantry: &Pantry,
) -> Result<Recipe> {
    let names = if with.is_empty() {
        pantry.names()
    } else {
        with.to_vec()
    };

    if !names.is_empty() {
        let recipes = provider.search_recipes_by_ingredients(&names).await?;
        if let Some(recipe) = recipes.into_iter().find(|r| r.id == recipe_id) {
            return Ok(recipe);
        }
    }

    let meals = provider.get_meals(false).await?;
    let Some(meal) = meals.into_iter().find(|m| m.recipe.id == recipe_id) else {
        larder_shared::not_found!("Recipe {recipe_id}");
    };

    Ok(meal.recipe)
}

fn write_recipe(recipe: &Recipe, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "#{} {}", recipe.id, recipe.name)?;

    let mut details = vec![];
    if let Some(nationality) = &recipe.nationality {
        details.push(nationality.to_owned());
    }
    if let Some(minutes) = recipe.cooking_time {
        details.push(format!("{minutes} min"));
    }
    if let Some(difficulty) = &recipe.difficulty {
        details.push(difficulty.to_owned());
    }
    if !details.is_empty() {
        writeln!(out, "  {}", details.join(" | "))?;
    }

    let ingredients = larder_recipe::ingredient_names(recipe);
    if !ingredients.is_empty() {
        writeln!(out, "  Ingredients: {}", ingredients.join(", "))?;
    }

    for (i, step) in larder_recipe::steps(&recipe.directions).iter().enumerate() {
        writeln!(out, "  {}. {step}", i + 1)?;
    }

    Ok(())
}
