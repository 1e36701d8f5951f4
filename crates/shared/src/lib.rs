mod allergen;
mod command;
mod date;
mod generation;
mod notice;
pub mod mealplan;
pub mod pantry;
pub mod provider;
pub mod recipe;
pub mod shopping;
pub mod user;

pub use allergen::*;
pub use command::*;
pub use date::*;
pub use generation::*;
pub use notice::*;

/// Identity key for ingredient and allergen names: trimmed and lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
