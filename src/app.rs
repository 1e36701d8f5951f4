use std::{io::Write, sync::Arc};

use larder_shared::{
    AllergenIndex, Error, Notices,
    provider::{ProfileStore, Provider},
};

use crate::config::Config;

/// Everything a command needs: configuration, the provider and the notices
/// raised while it runs.
pub struct App {
    pub config: Config,
    pub provider: Arc<dyn Provider>,
    pub notices: Notices,
}

impl App {
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let provider = crate::provider::connect(&config.provider).await?;

        Ok(Self::new(config, provider))
    }

    pub fn new(config: Config, provider: Arc<dyn Provider>) -> Self {
        Self {
            config,
            provider,
            notices: Notices::new(),
        }
    }

    /// Declared allergens of the user, expanded. Falls back to an empty index
    /// when the profile cannot be fetched.
    pub async fn allergens(&mut self) -> AllergenIndex {
        let result = self.provider.get_user_allergens().await.map_err(Error::from);
        let names = self.notices.report(result).unwrap_or_default();

        if self.config.allergens.extended_families {
            AllergenIndex::expand_extended(names)
        } else {
            AllergenIndex::expand(names)
        }
    }

    /// Stored dietary preference of the user, `None` when unset or when the
    /// profile cannot be fetched.
    pub async fn dietary_preference(&mut self) -> Option<u64> {
        let result = self
            .provider
            .get_dietary_preference()
            .await
            .map_err(Error::from);

        self.notices.report(result).flatten()
    }

    /// Writes and clears pending notices.
    pub fn flush_notices(&mut self, err: &mut impl Write) -> std::io::Result<()> {
        for notice in self.notices.drain() {
            writeln!(err, "[{}] {}", notice.level, notice.message)?;
        }

        Ok(())
    }
}
