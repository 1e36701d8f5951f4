#![allow(dead_code)]

use std::sync::Arc;

use clap::Parser;
use larder::{
    App,
    cli::{Cli, run},
    config::Config,
};
use larder_shared::provider::{Fixture, MemoryProvider};
use temp_dir::TempDir;

pub async fn setup(dir: &TempDir) -> anyhow::Result<App> {
    setup_with(dir, |_| {}).await
}

/// Same as [`setup`] with the fixture adjusted first.
pub async fn setup_with(dir: &TempDir, adjust: impl FnOnce(&mut Fixture)) -> anyhow::Result<App> {
    let mut fixture = larder::provider::load_fixture("config/fixture.json").await?;
    adjust(&mut fixture);

    let mut config = Config::default();
    config.catalog.debounce_ms = 0;
    config.shopping.path = dir
        .child("shopping_list.json")
        .to_string_lossy()
        .into_owned();

    Ok(App::new(config, Arc::new(MemoryProvider::new(fixture))))
}

/// Parses `args` like the binary does and returns what the command printed.
pub async fn exec(app: &mut App, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("larder").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(app, cli.command, &mut out).await?;

    Ok(String::from_utf8(out)?)
}

pub fn messages(app: &mut App) -> Vec<String> {
    app.notices.drain().into_iter().map(|n| n.message).collect()
}
