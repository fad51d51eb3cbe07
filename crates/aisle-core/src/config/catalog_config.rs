use serde::{Deserialize, Serialize};

use super::defaults;

/// Catalog source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog file (.csv or .json).
    pub path: String,
    /// Max chars of the description used to repair a blank title.
    pub title_fallback_chars: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_CATALOG_PATH.to_string(),
            title_fallback_chars: defaults::DEFAULT_TITLE_FALLBACK_CHARS,
        }
    }
}
