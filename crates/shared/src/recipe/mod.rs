use serde::{Deserialize, Serialize};

/// Catalog or recipe ingredient. Identity is the normalized name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn key(&self) -> String {
        crate::normalize_name(&self.name)
    }
}

impl From<&str> for Ingredient {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Ingredient {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Recipe directions as delivered by the provider: either a structured list
/// of steps or a legacy free-text blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Directions {
    Steps(Vec<String>),
    Text(String),
}

impl Default for Directions {
    fn default() -> Self {
        Directions::Text(String::new())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "steps")]
    pub directions: Directions,
    /// Explicit "contains" allergen tags attached by the provider.
    #[serde(default, alias = "contains_allergens")]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default, alias = "cookingTime")]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl Recipe {
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_recipe_with_legacy_fields() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Pancakes",
                "ingredients": [{"name": "flour"}, {"name": "egg"}],
                "description": "[\"flour\", \"egg\"]",
                "steps": "Mix\nFry",
                "cookingTime": 20
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.ingredient_names().collect::<Vec<_>>(), ["flour", "egg"]);
        assert_eq!(recipe.directions, Directions::Text("Mix\nFry".to_owned()));
        assert_eq!(recipe.cooking_time, Some(20));
        assert!(recipe.allergens.is_empty());
    }

    #[test]
    fn test_deserialize_structured_steps() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": 1, "name": "Toast", "directions": ["Slice", "Toast"]}"#)
                .unwrap();
        assert_eq!(
            recipe.directions,
            Directions::Steps(vec!["Slice".to_owned(), "Toast".to_owned()])
        );
    }
}
