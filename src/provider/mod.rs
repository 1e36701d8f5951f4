mod http;

pub use http::*;

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context;
use larder_shared::provider::{Fixture, MemoryProvider, Provider};

use crate::config::{ProviderConfig, ProviderKind};

/// Reads a fixture file for the in-memory provider.
pub async fn load_fixture(path: impl AsRef<Path>) -> anyhow::Result<Fixture> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading fixture {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("parsing fixture {}", path.display()))
}

/// Builds the provider selected by configuration.
pub async fn connect(config: &ProviderConfig) -> anyhow::Result<Arc<dyn Provider>> {
    match config.kind {
        ProviderKind::Http => {
            tracing::debug!(base_url = %config.base_url, "using http provider");
            let provider = HttpProvider::new(
                &config.base_url,
                config.token.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(provider))
        }
        ProviderKind::Fixture => {
            tracing::debug!(path = %config.fixture_path, "using fixture provider");
            let fixture = load_fixture(&config.fixture_path).await?;
            Ok(Arc::new(MemoryProvider::new(fixture)))
        }
    }
}
