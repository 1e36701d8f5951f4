use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub name: String,
    /// Name of the recipe the item was added for.
    pub source_recipe: String,
    pub completed: bool,
}

impl ShoppingListItem {
    pub fn new(name: impl Into<String>, source_recipe: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            name: name.into(),
            source_recipe: source_recipe.into(),
            completed: false,
        }
    }

    pub fn key(&self) -> String {
        crate::normalize_name(&self.name)
    }
}
