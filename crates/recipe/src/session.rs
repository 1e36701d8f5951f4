use std::collections::HashSet;

use larder_shared::{
    AllergenIndex, Error, Generation, Notice, Result, Ticket, normalize_name,
    pantry::PantryItem,
    provider::{PantryStore, RecipeSearch},
    recipe::Recipe,
};

use crate::defensive_filter;

pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Outcome of a completed search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The provider returned nothing for the selection.
    NoResults,
    Found(usize),
    /// A newer search was started; this response was dropped.
    Stale,
}

impl SearchStatus {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SearchStatus::NoResults => Some(Notice::warning(
                "No recipes found. Try selecting different ingredients.",
            )),
            SearchStatus::Found(_) | SearchStatus::Stale => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub ingredients: Vec<String>,
}

/// Recipe search results for the current selection, filtered and paginated.
#[derive(Clone, Debug)]
pub struct MatchSession {
    allergens: AllergenIndex,
    results: Vec<Recipe>,
    page: usize,
    page_size: usize,
    generation: Generation,
    has_searched: bool,
}

impl MatchSession {
    pub fn new(allergens: AllergenIndex) -> Self {
        Self {
            allergens,
            results: vec![],
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            generation: Generation::new(),
            has_searched: false,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn set_allergens(&mut self, allergens: AllergenIndex) {
        self.allergens = allergens;
    }

    pub fn allergens(&self) -> &AllergenIndex {
        &self.allergens
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Starts a search, superseding any search still in flight.
    pub fn begin(&self, selected: &[String]) -> Result<SearchRequest> {
        let ingredients = selected
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();

        if ingredients.is_empty() {
            return Err(Error::EmptySelection);
        }

        Ok(SearchRequest {
            ticket: self.generation.next(),
            ingredients,
        })
    }

    /// Applies the provider response for `ticket`.
    ///
    /// A provider failure keeps the previous results. Results that are all
    /// allergenic are cleared and reported as [`Error::AllAllergenic`].
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: anyhow::Result<Vec<Recipe>>,
    ) -> Result<SearchStatus> {
        if !self.generation.is_current(ticket) {
            tracing::debug!(ticket = ticket.value(), "dropping stale recipe response");
            return Ok(SearchStatus::Stale);
        }

        let recipes = result?;
        let found = recipes.len();
        let safe = defensive_filter(&self.allergens, recipes);

        self.has_searched = true;
        self.page = 1;
        self.results = safe;

        if found > 0 && self.results.is_empty() {
            return Err(Error::AllAllergenic);
        }

        if found == 0 {
            return Ok(SearchStatus::NoResults);
        }

        Ok(SearchStatus::Found(self.results.len()))
    }

    pub async fn search<P>(&mut self, provider: &P, selected: &[String]) -> Result<SearchStatus>
    where
        P: RecipeSearch + ?Sized,
    {
        let request = self.begin(selected)?;
        let result = provider
            .search_recipes_by_ingredients(&request.ingredients)
            .await;

        self.complete(request.ticket, result)
    }

    /// Searches with the user's pantry instead of a manual selection.
    pub async fn search_from_pantry<P>(&mut self, provider: &P) -> Result<SearchStatus>
    where
        P: PantryStore + RecipeSearch + ?Sized,
    {
        let pantry = provider.get_pantry().await?;
        let names = safe_pantry_names(&self.allergens, &pantry);

        if names.is_empty() {
            return Err(Error::NoSafeIngredients);
        }

        self.search(provider, &names).await
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.results.len().div_ceil(self.page_size).max(1)
    }

    pub fn page_items(&self) -> &[Recipe] {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.results.len());

        self.results.get(start..end).unwrap_or(&[])
    }

    /// Moves to `page`, clamped to the available pages.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to(self.page + 1)
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn find(&self, id: u64) -> Option<&Recipe> {
        self.results.iter().find(|r| r.id == id)
    }
}

/// Pantry names that do not match any allergen, deduplicated by key.
pub fn safe_pantry_names(allergens: &AllergenIndex, pantry: &[PantryItem]) -> Vec<String> {
    let mut seen = HashSet::new();

    pantry
        .iter()
        .map(|p| p.name.trim())
        .filter(|n| !n.is_empty() && !allergens.matches(n))
        .filter(|n| seen.insert(normalize_name(n)))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipes(count: u64) -> Vec<Recipe> {
        (1..=count)
            .map(|id| Recipe {
                id,
                name: format!("recipe {id}"),
                ingredients: vec!["rice".into()],
                ..Default::default()
            })
            .collect()
    }

    fn searched(count: u64) -> MatchSession {
        let mut session = MatchSession::new(AllergenIndex::default());
        let request = session.begin(&["rice".to_owned()]).unwrap();
        session.complete(request.ticket, Ok(recipes(count))).unwrap();
        session
    }

    #[test]
    fn test_empty_selection() {
        let session = MatchSession::new(AllergenIndex::default());
        assert!(matches!(session.begin(&[]), Err(Error::EmptySelection)));
        assert!(matches!(
            session.begin(&["  ".to_owned()]),
            Err(Error::EmptySelection)
        ));
    }

    #[test]
    fn test_pagination_clamps() {
        let mut session = searched(9);
        assert_eq!(session.total_pages(), 3);
        assert_eq!(session.page_items().len(), 4);

        assert_eq!(session.go_to(10), 3);
        assert_eq!(session.page_items().len(), 1);
        assert_eq!(session.next_page(), 3);

        assert_eq!(session.go_to(0), 1);
        assert_eq!(session.previous_page(), 1);
    }

    #[test]
    fn test_empty_results_have_one_page() {
        let mut session = searched(0);
        assert_eq!(session.total_pages(), 1);
        assert!(session.page_items().is_empty());
        assert_eq!(session.next_page(), 1);
    }

    #[test]
    fn test_new_search_resets_page() {
        let mut session = searched(9);
        session.go_to(3);

        let request = session.begin(&["rice".to_owned()]).unwrap();
        session.complete(request.ticket, Ok(recipes(5))).unwrap();
        assert_eq!(session.page(), 1);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut session = MatchSession::new(AllergenIndex::default());
        let first = session.begin(&["rice".to_owned()]).unwrap();
        let second = session.begin(&["rice".to_owned()]).unwrap();

        assert_eq!(
            session.complete(second.ticket, Ok(recipes(2))).unwrap(),
            SearchStatus::Found(2)
        );
        assert_eq!(
            session.complete(first.ticket, Ok(recipes(7))).unwrap(),
            SearchStatus::Stale
        );
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn test_safe_pantry_names() {
        let item = |id, name: &str| PantryItem {
            id,
            name: name.to_owned(),
            quantity: 1,
            expiration_date: None,
            notes: None,
        };
        let pantry = [item(1, "Flour"), item(2, "eggs"), item(3, "flour "), item(4, "Eggplant")];

        assert_eq!(
            safe_pantry_names(&AllergenIndex::expand(["egg"]), &pantry),
            ["Flour", "Eggplant"]
        );
    }
}
