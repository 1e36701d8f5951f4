use std::{collections::HashSet, path::Path};

use anyhow::Context;
use larder_shared::{
    Notice, normalize_name, pantry::PantryItem, recipe::Recipe, shopping::ShoppingListItem,
};
use serde::{Deserialize, Serialize};

use crate::missing;

/// Result of adding a recipe's missing ingredients to the list.
#[derive(Clone, Debug)]
pub struct AddOutcome {
    pub added: Vec<ShoppingListItem>,
    pub notice: Notice,
}

/// Local shopping list. Items are only removed by explicit user action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|i| !i.completed).count()
    }

    pub fn completed(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = normalize_name(name);
        self.items.iter().any(|i| i.key() == key)
    }

    /// Appends every ingredient of `recipe` missing from `pantry` and not
    /// already listed.
    pub fn add_missing(&mut self, recipe: &Recipe, pantry: &[PantryItem]) -> AddOutcome {
        let missing = missing(recipe, pantry);
        if missing.is_empty() {
            return AddOutcome {
                added: vec![],
                notice: Notice::info(format!(
                    "You already have everything for {}.",
                    recipe.name
                )),
            };
        }

        let listed = self.items.iter().map(|i| i.key()).collect::<HashSet<_>>();
        let added = missing
            .into_iter()
            .filter(|name| !listed.contains(&normalize_name(name)))
            .map(|name| ShoppingListItem::new(name, recipe.name.to_owned()))
            .collect::<Vec<_>>();

        if added.is_empty() {
            return AddOutcome {
                added,
                notice: Notice::info("Those ingredients are already on your shopping list."),
            };
        }

        self.items.extend(added.iter().cloned());
        tracing::debug!(recipe = %recipe.name, count = added.len(), "shopping list updated");

        let notice = match added.len() {
            1 => Notice::success("Added 1 item to your shopping list."),
            n => Notice::success(format!("Added {n} items to your shopping list.")),
        };

        AddOutcome { added, notice }
    }

    /// Flips `completed` for `id`. Returns the new state, `None` when the id
    /// is unknown.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        item.completed = !item.completed;

        Some(item.completed)
    }

    pub fn remove(&mut self, id: &str) -> Option<ShoppingListItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;

        Some(self.items.remove(pos))
    }

    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !i.completed);

        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reads the list from `path`. A missing file is an empty list.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };

        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("writing {}", path.display()))
    }
}
