use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use larder_mealplan::WeekStart;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub recipes: RecipesConfig,
    #[serde(default)]
    pub allergens: AllergensConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Http,
    #[default]
    Fixture,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent to the HTTP API
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: default_base_url(),
            token: None,
            fixture_path: default_fixture_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_fixture_path() -> String {
    "config/fixture.json".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_display_size")]
    pub display_size: usize,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            display_size: default_display_size(),
            debounce_ms: default_debounce_ms(),
            fetch_limit: default_fetch_limit(),
        }
    }
}

fn default_display_size() -> usize {
    larder_catalog::DEFAULT_DISPLAY_SIZE
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_fetch_limit() -> usize {
    larder_catalog::DEFAULT_FETCH_LIMIT
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    larder_recipe::DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AllergensConfig {
    /// Also match every ingredient of a declared allergen's family
    /// (milk pulls in cheese, whey, butter...)
    #[serde(default)]
    pub extended_families: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CalendarConfig {
    #[serde(default)]
    pub week_start: WeekStart,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    #[serde(default = "default_shopping_path")]
    pub path: String,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            path: default_shopping_path(),
        }
    }
}

fn default_shopping_path() -> String {
    "shopping_list.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LARDER__PROVIDER__KIND, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_file_path = config_path
            .or_else(|| env::var("LARDER_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional, defaults cover every key
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(token) = env::var("LARDER_TOKEN") {
            builder = builder.set_override("provider.token", token)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.recipes.page_size < 1 {
            return Err("Recipe page_size must be at least 1".to_string());
        }
        if self.catalog.display_size < 1 {
            return Err("Catalog display_size must be at least 1".to_string());
        }
        if self.provider.kind == ProviderKind::Http && self.provider.base_url.trim().is_empty() {
            return Err("Provider base_url is required for the http provider".to_string());
        }
        Ok(())
    }
}
