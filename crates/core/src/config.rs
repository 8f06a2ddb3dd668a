use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::CoreError;

/// Hard cap on the number of autocomplete suggestions.
pub const MAX_SUGGESTIONS: usize = 10;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Runtime settings for a catalog, usually read from a TOML file:
///
/// ```toml
/// suggestion_limit = 5
/// store_timeout_ms = 2000
/// database_path = "inventory.db"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub suggestion_limit: usize,
    pub store_timeout_ms: u64,
    /// `None` keeps the catalog in memory.
    pub database_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: MAX_SUGGESTIONS,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            database_path: None,
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(text)?)
    }

    /// Suggestion cap clamped to `1..=MAX_SUGGESTIONS`.
    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit.clamp(1, MAX_SUGGESTIONS)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
