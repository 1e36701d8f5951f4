use std::{sync::Arc, time::Duration};

use larder_shared::{Generation, Ticket, provider::IngredientCatalog, recipe::Ingredient};

use crate::{CatalogView, RefreshRequest};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Outcome of a refresh that survived its debounce window.
#[derive(Debug)]
pub struct Fetched {
    pub ticket: Ticket,
    pub result: anyhow::Result<Vec<Ingredient>>,
}

impl CatalogView {
    pub fn apply_fetched(&mut self, fetched: Fetched) -> bool {
        self.apply(fetched.ticket, fetched.result)
    }
}

/// Debounced catalog fetcher.
///
/// Each keystroke issues a new ticket; a pending refresh whose ticket has been
/// superseded when its timer fires never reaches the provider.
pub struct Refresher<C: ?Sized> {
    catalog: Arc<C>,
    debounce: Duration,
}

impl<C: IngredientCatalog + ?Sized> Refresher<C> {
    pub fn new(catalog: Arc<C>, debounce: Duration) -> Self {
        Self { catalog, debounce }
    }

    pub async fn run(&self, request: RefreshRequest, generation: &Generation) -> Option<Fetched> {
        tokio::time::sleep(self.debounce).await;

        if !generation.is_current(request.ticket) {
            tracing::debug!(
                ticket = request.ticket.value(),
                "refresh superseded before firing"
            );
            return None;
        }

        let result = self
            .catalog
            .get_ingredients(
                request.query.as_deref(),
                request.diet_filtered,
                request.limit,
            )
            .await;

        Some(Fetched {
            ticket: request.ticket,
            result,
        })
    }

    /// Loads the ingredient pool used for backfill. Failures leave the view
    /// untouched.
    pub async fn load_pool(&self, view: &mut CatalogView, limit: usize) {
        match self
            .catalog
            .get_ingredients(None, view.diet_filter_enabled(), limit)
            .await
        {
            Ok(pool) => view.set_pool(pool),
            Err(error) => tracing::warn!(error = %error, "failed to load ingredient pool"),
        }
    }
}

impl<C: ?Sized> Clone for Refresher<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            debounce: self.debounce,
        }
    }
}
