//! Compatibility shim for legacy recipe text.
//!
//! Older recipes carry their ingredient list inside `description` (sometimes
//! as a JSON array, sometimes as a Python-style list or plain comma separated
//! text) and their directions as one free-text blob.

use std::sync::LazyLock;

use larder_shared::recipe::{Directions, Recipe};
use regex::Regex;

static STEP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:step\s*)?\d+\s*[.):]|[-*•])\s*").expect("step marker regex")
});

fn strip_list_chars(item: &str) -> &str {
    item.trim_matches(|c: char| matches!(c, '[' | ']' | '"' | '\'') || c.is_whitespace())
}

fn parse_json_list(text: &str) -> Option<Vec<String>> {
    if !text.starts_with('[') {
        return None;
    }

    serde_json::from_str::<Vec<String>>(text).ok()
}

/// Ingredient names found in a legacy description.
///
/// A JSON array of strings is taken as is. Anything else has brackets and
/// quotes stripped and is split on commas and line breaks.
pub fn ingredient_lines(description: &str) -> Vec<String> {
    let text = description.trim();

    let items = match parse_json_list(text) {
        Some(items) => items,
        None => text
            .split([',', '\n'])
            .map(|s| strip_list_chars(s).to_owned())
            .collect(),
    };

    items
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Ordered cooking steps with numbering and bullet markers removed.
pub fn steps(directions: &Directions) -> Vec<String> {
    let lines = match directions {
        Directions::Steps(steps) => steps.clone(),
        Directions::Text(text) => parse_json_list(text.trim())
            .unwrap_or_else(|| text.lines().map(str::to_owned).collect()),
    };

    lines
        .iter()
        .map(|line| STEP_MARKER.replace(line, "").trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Ingredient names of a recipe, falling back to its description when the
/// provider sent no structured list.
pub fn ingredient_names(recipe: &Recipe) -> Vec<String> {
    if recipe.ingredients.is_empty() {
        return ingredient_lines(&recipe.description);
    }

    recipe
        .ingredient_names()
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_lines_from_json() {
        assert_eq!(
            ingredient_lines(r#"["2 eggs", "flour", ""]"#),
            ["2 eggs", "flour"]
        );
    }

    #[test]
    fn test_ingredient_lines_from_python_list() {
        assert_eq!(
            ingredient_lines("['flour', 'sugar', \"milk\"]"),
            ["flour", "sugar", "milk"]
        );
    }

    #[test]
    fn test_ingredient_lines_from_plain_text() {
        assert_eq!(
            ingredient_lines("flour, sugar\n butter ,"),
            ["flour", "sugar", "butter"]
        );
        assert!(ingredient_lines("   ").is_empty());
    }

    #[test]
    fn test_steps_from_text() {
        let directions = Directions::Text("1. Mix flour\n\n2) Add eggs\n- Bake\nStep 4: Serve".to_owned());
        assert_eq!(
            steps(&directions),
            ["Mix flour", "Add eggs", "Bake", "Serve"]
        );
    }

    #[test]
    fn test_steps_from_json_text() {
        let directions = Directions::Text(r#"["Boil water", "Add pasta"]"#.to_owned());
        assert_eq!(steps(&directions), ["Boil water", "Add pasta"]);
    }

    #[test]
    fn test_structured_steps() {
        let directions = Directions::Steps(vec!["  Chop ".to_owned(), "".to_owned()]);
        assert_eq!(steps(&directions), ["Chop"]);
    }

    #[test]
    fn test_ingredient_names_fallback() {
        let recipe = Recipe {
            description: "['flour', 'egg']".to_owned(),
            ..Default::default()
        };
        assert_eq!(ingredient_names(&recipe), ["flour", "egg"]);

        let recipe = Recipe {
            ingredients: vec!["butter".into()],
            description: "['flour', 'egg']".to_owned(),
            ..Default::default()
        };
        assert_eq!(ingredient_names(&recipe), ["butter"]);
    }
}
