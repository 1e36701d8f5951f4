use std::collections::HashSet;

use larder_shared::{AllergenIndex, Generation, Ticket, normalize_name, recipe::Ingredient};
use rand::{Rng, seq::SliceRandom};

/// Shown when nothing better is known yet, and after a failed fetch with no
/// earlier popular list.
pub const POPULAR_INGREDIENTS: &[&str] = &[
    "egg", "milk", "cheese", "butter", "flour", "sugar", "tomato", "onion", "chicken", "beef",
    "pasta", "rice", "carrot", "potato",
];

pub const DEFAULT_DISPLAY_SIZE: usize = 20;
pub const DEFAULT_FETCH_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileState {
    Idle,
    Selected,
    /// Picked by the user although it matches a declared allergen.
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub name: String,
    pub state: TileState,
}

impl Tile {
    pub fn is_selected(&self) -> bool {
        self.state != TileState::Idle
    }
}

/// Fetch to perform once the debounce window has elapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshRequest {
    pub ticket: Ticket,
    /// `None` asks for the popular list.
    pub query: Option<String>,
    pub diet_filtered: bool,
    pub limit: usize,
}

/// State of the ingredient picker: search text, selections and the
/// candidate tiles last fetched from the catalog.
#[derive(Clone, Debug)]
pub struct CatalogView {
    search_text: String,
    selected_ingredients: Vec<String>,
    selected_allergens: Vec<String>,
    diet_filter_enabled: bool,
    allergens: AllergenIndex,
    candidates: Vec<Ingredient>,
    fallback: Vec<Ingredient>,
    pool: Vec<Ingredient>,
    generation: Generation,
    display_size: usize,
    fetch_limit: usize,
}

impl CatalogView {
    pub fn new(allergens: AllergenIndex) -> Self {
        let popular = POPULAR_INGREDIENTS
            .iter()
            .map(|n| Ingredient::new(*n))
            .collect::<Vec<_>>();

        Self {
            search_text: String::new(),
            selected_ingredients: vec![],
            selected_allergens: vec![],
            diet_filter_enabled: false,
            allergens,
            candidates: popular.clone(),
            fallback: popular,
            pool: vec![],
            generation: Generation::new(),
            display_size: DEFAULT_DISPLAY_SIZE,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    pub fn with_display_size(mut self, display_size: usize) -> Self {
        self.display_size = display_size;
        self
    }

    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    /// Replaces the index and moves every selected name to the set its new
    /// allergen status belongs to.
    pub fn set_allergens(&mut self, allergens: AllergenIndex) {
        self.allergens = allergens;

        let selected = std::mem::take(&mut self.selected_ingredients)
            .into_iter()
            .chain(std::mem::take(&mut self.selected_allergens));
        let (allergenic, safe): (Vec<_>, Vec<_>) =
            selected.partition(|name| self.allergens.matches(name));

        self.selected_ingredients = safe;
        self.selected_allergens = allergenic;
    }

    pub fn allergens(&self) -> &AllergenIndex {
        &self.allergens
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> RefreshRequest {
        self.search_text = text.into();
        self.refresh_request()
    }

    pub fn diet_filter_enabled(&self) -> bool {
        self.diet_filter_enabled
    }

    pub fn set_diet_filter(&mut self, enabled: bool) -> RefreshRequest {
        self.diet_filter_enabled = enabled;
        self.refresh_request()
    }

    /// Issues a new ticket, superseding every request issued before.
    pub fn refresh_request(&self) -> RefreshRequest {
        let query = self.search_text.trim();

        RefreshRequest {
            ticket: self.generation.next(),
            query: (!query.is_empty()).then(|| query.to_owned()),
            diet_filtered: self.diet_filter_enabled,
            limit: self.fetch_limit,
        }
    }

    /// Applies a fetch result. Returns `false` when the ticket was superseded
    /// and the result was dropped.
    ///
    /// A failed fetch falls back to the last known popular list.
    pub fn apply(&mut self, ticket: Ticket, result: anyhow::Result<Vec<Ingredient>>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(ticket = ticket.value(), "dropping stale catalog response");
            return false;
        }

        match result {
            Ok(ingredients) => {
                if self.search_text.trim().is_empty() && !ingredients.is_empty() {
                    self.fallback = ingredients.clone();
                }
                self.candidates = ingredients;
            }
            Err(error) => {
                tracing::warn!(error = %error, "catalog fetch failed, using fallback list");
                self.candidates = self.fallback.clone();
            }
        }

        true
    }

    /// Full ingredient universe used to backfill short candidate lists.
    pub fn set_pool(&mut self, pool: Vec<Ingredient>) {
        self.pool = pool;
    }

    pub fn selected_ingredients(&self) -> &[String] {
        &self.selected_ingredients
    }

    pub fn selected_allergens(&self) -> &[String] {
        &self.selected_allergens
    }

    /// Every selected name, allergenic ones included, in selection order.
    pub fn selection(&self) -> Vec<String> {
        self.selected_ingredients
            .iter()
            .chain(self.selected_allergens.iter())
            .cloned()
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected_ingredients.clear();
        self.selected_allergens.clear();
    }

    pub fn state_of(&self, name: &str) -> TileState {
        let key = normalize_name(name);
        if contains_key(&self.selected_allergens, &key) {
            TileState::Danger
        } else if contains_key(&self.selected_ingredients, &key) {
            TileState::Selected
        } else {
            TileState::Idle
        }
    }

    /// Selects or deselects `name` and returns its new state.
    pub fn toggle(&mut self, name: &str) -> TileState {
        let key = normalize_name(name);
        if key.is_empty() {
            return TileState::Idle;
        }

        for set in [&mut self.selected_ingredients, &mut self.selected_allergens] {
            if let Some(pos) = set.iter().position(|n| normalize_name(n) == key) {
                set.remove(pos);
                return TileState::Idle;
            }
        }

        let name = name.trim().to_owned();
        if self.allergens.matches(&name) {
            self.selected_allergens.push(name);
            TileState::Danger
        } else {
            self.selected_ingredients.push(name);
            TileState::Selected
        }
    }

    /// Computes the tiles for one render pass.
    ///
    /// Allergenic candidates are dropped unless selected, selected names are
    /// always shown, a short list is backfilled with random safe draws from
    /// the pool, and selected tiles move to the front keeping relative order.
    pub fn tiles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Tile> {
        let mut seen = HashSet::new();
        let mut tiles = vec![];

        for ingredient in &self.candidates {
            let key = ingredient.key();
            if key.is_empty() || !seen.insert(key) {
                continue;
            }

            let state = self.state_of(&ingredient.name);
            if state == TileState::Idle && self.allergens.matches(&ingredient.name) {
                continue;
            }

            tiles.push(Tile {
                name: ingredient.name.to_owned(),
                state,
            });
        }

        for name in self.selection() {
            if seen.insert(normalize_name(&name)) {
                tiles.push(Tile {
                    state: self.state_of(&name),
                    name,
                });
            }
        }

        if tiles.len() < self.display_size {
            let mut draws = vec![];
            for ingredient in &self.pool {
                let key = ingredient.key();
                if key.is_empty() || seen.contains(&key) || self.allergens.matches(&key) {
                    continue;
                }
                seen.insert(key);
                draws.push(ingredient.name.to_owned());
            }

            let missing = self.display_size - tiles.len();
            draws.shuffle(rng);
            tiles.extend(
                draws
                    .into_iter()
                    .take(missing)
                    .map(|name| Tile {
                        name,
                        state: TileState::Idle,
                    }),
            );
        }

        tiles.sort_by_key(|t| !t.is_selected());

        tiles
    }
}

fn contains_key(names: &[String], key: &str) -> bool {
    names.iter().any(|n| normalize_name(n) == key)
}
