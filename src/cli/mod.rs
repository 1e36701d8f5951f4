mod calendar;
mod catalog;
mod pantry;
mod recipes;
mod shopping;

pub use calendar::*;
pub use catalog::*;
pub use pantry::*;
pub use recipes::*;
pub use shopping::*;

use std::io::Write;

use clap::{Parser, Subcommand};
use larder_mealplan::CalendarView;
use time::Date;

use crate::App;

/// larder - allergen-aware recipes, pantry and meal calendar
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Allergen-aware recipe matching, pantry and meal calendar", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the ingredient picker tiles
    Catalog {
        /// Search text (popular ingredients when empty)
        #[arg(long)]
        search: Option<String>,

        /// Use the diet-filtered ingredient endpoint (always on when the
        /// profile stores a dietary preference)
        #[arg(long)]
        diet: bool,

        /// Ingredient to toggle before rendering (repeatable)
        #[arg(long = "select")]
        select: Vec<String>,
    },
    /// Find recipes for the given ingredients
    Search {
        ingredients: Vec<String>,

        /// Search with the pantry contents instead
        #[arg(long, conflicts_with = "ingredients")]
        pantry: bool,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List the ingredients of a recipe missing from the pantry
    Missing {
        recipe_id: u64,

        /// Ingredients used to find the recipe (defaults to the pantry)
        #[arg(long = "with", num_args = 1..)]
        with: Vec<String>,
    },
    /// Manage the local shopping list
    Shopping {
        #[command(subcommand)]
        command: ShoppingCommand,
    },
    /// Manage the pantry
    Pantry {
        #[command(subcommand)]
        command: PantryCommand,
    },
    /// Show the meal calendar
    Calendar {
        view: Option<CalendarView>,

        /// Anchor date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_cli_date)]
        date: Option<Date>,
    },
    /// Schedule a template meal
    Schedule {
        template_id: u64,
        date: String,
        meal_type: String,
    },
    /// Manage meal templates
    Meals {
        #[command(subcommand)]
        command: MealsCommand,
    },
}

#[derive(Subcommand)]
pub enum ShoppingCommand {
    /// Add the missing ingredients of a recipe
    Add {
        recipe_id: u64,

        #[arg(long = "with", num_args = 1..)]
        with: Vec<String>,
    },
    List,
    Toggle {
        id: String,
    },
    Remove {
        id: String,
    },
    Clear {
        /// Only remove completed items
        #[arg(long)]
        completed: bool,
    },
}

#[derive(Subcommand)]
pub enum PantryCommand {
    List,
    Add {
        name: String,

        #[arg(long, default_value_t = 1)]
        quantity: u32,

        #[arg(long, value_parser = parse_cli_date)]
        expires: Option<Date>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit quantity or notes
    Set {
        id: u64,

        #[arg(long)]
        quantity: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },
    Remove {
        id: u64,
    },
    /// Items expiring within the given number of days
    Expiring {
        #[arg(long, default_value_t = 3)]
        days: i64,
    },
}

#[derive(Subcommand)]
pub enum MealsCommand {
    Templates,
    /// Save a recipe as a template
    Save {
        recipe_id: u64,

        #[arg(long = "with", num_args = 1..)]
        with: Vec<String>,
    },
    Delete {
        id: u64,
    },
}

fn parse_cli_date(value: &str) -> Result<Date, String> {
    larder_shared::parse_date(value).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Runs one command. Domain errors end up in `app.notices`, only
/// configuration and IO failures are returned.
pub async fn run(app: &mut App, command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Catalog {
            search,
            diet,
            select,
        } => catalog(app, search, diet, select, out).await,
        Commands::Search {
            ingredients,
            pantry,
            page,
        } => search(app, ingredients, pantry, page, out).await,
        Commands::Missing { recipe_id, with } => missing(app, recipe_id, with, out).await,
        Commands::Shopping { command } => shopping(app, command, out).await,
        Commands::Pantry { command } => pantry(app, command, out).await,
        Commands::Calendar { view, date } => calendar(app, view.unwrap_or_default(), date, out).await,
        Commands::Schedule {
            template_id,
            date,
            meal_type,
        } => schedule(app, template_id, date, meal_type, out).await,
        Commands::Meals { command } => meals(app, command, out).await,
    }
}
