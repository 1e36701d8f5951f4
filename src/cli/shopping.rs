use std::io::Write;

use larder_pantry::{Pantry, ShoppingList};
use larder_shared::{Error, Notice};

use crate::{App, cli::ShoppingCommand};

pub async fn shopping(
    app: &mut App,
    command: ShoppingCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let path = app.config.shopping.path.clone();
    let mut list = ShoppingList::load(&path).await?;

    match command {
        ShoppingCommand::Add { recipe_id, with } => {
            let result = Pantry::load(app.provider.as_ref()).await;
            let Some(pantry) = app.notices.report(result) else {
                return Ok(());
            };

            let result =
                super::find_recipe(app.provider.as_ref(), recipe_id, &with, &pantry).await;
            let Some(recipe) = app.notices.report(result) else {
                return Ok(());
            };

            let outcome = list.add_missing(&recipe, pantry.items());
            for item in &outcome.added {
                writeln!(out, "+ {} ({})", item.name, item.id)?;
            }
            app.notices.push(outcome.notice);
        }
        ShoppingCommand::List => {
            for item in list.items() {
                let mark = if item.completed { "x" } else { " " };
                writeln!(
                    out,
                    "[{mark}] {} ({}) {}",
                    item.name, item.source_recipe, item.id
                )?;
            }
            writeln!(
                out,
                "{} remaining, {} completed",
                list.remaining(),
                list.completed()
            )?;
            return Ok(());
        }
        ShoppingCommand::Toggle { id } => match list.toggle(&id) {
            Some(completed) => {
                let state = if completed { "completed" } else { "not completed" };
                writeln!(out, "{id} {state}")?;
            }
            None => app
                .notices
                .push(Notice::from(Error::NotFound(format!("Shopping list item {id}")))),
        },
        ShoppingCommand::Remove { id } => {
            if let Some(item) = list.remove(&id) {
                writeln!(out, "- {}", item.name)?;
            }
        }
        ShoppingCommand::Clear { completed } => {
            if completed {
                let removed = list.clear_completed();
                writeln!(out, "Removed {removed} completed items")?;
            } else {
                list.clear();
                writeln!(out, "Shopping list cleared")?;
            }
        }
    }

    list.save(&path).await
}
