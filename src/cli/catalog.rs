use std::{io::Write, time::Duration};

use larder_catalog::{CatalogView, Refresher, TileState};

use crate::App;

pub async fn catalog(
    app: &mut App,
    search: Option<String>,
    diet: bool,
    select: Vec<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = app.config.catalog.clone();
    let allergens = app.allergens().await;
    let diet = diet || app.dietary_preference().await.is_some();
    let refresher = Refresher::new(
        app.provider.clone(),
        Duration::from_millis(config.debounce_ms),
    );

    let mut view = CatalogView::new(allergens)
        .with_display_size(config.display_size)
        .with_fetch_limit(config.fetch_limit);
    view.set_diet_filter(diet);
    refresher.load_pool(&mut view, config.fetch_limit).await;

    for name in &select {
        view.toggle(name);
    }

    let request = view.set_search_text(search.unwrap_or_default());
    if let Some(fetched) = refresher.run(request, view.generation()).await {
        view.apply_fetched(fetched);
    }

    for tile in view.tiles(&mut rand::rng()) {
        let mark = match tile.state {
            TileState::Idle => " ",
            TileState::Selected => "x",
            TileState::Danger => "!",
        };
        writeln!(out, "[{mark}] {}", tile.name)?;
    }

    if !view.selected_allergens().is_empty() {
        writeln!(
            out,
            "warning: {} matches your allergies",
            view.selected_allergens().join(", ")
        )?;
    }

    Ok(())
}
