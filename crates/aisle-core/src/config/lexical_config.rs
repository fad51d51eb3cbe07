use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-field term weights for the lexical index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    pub title_weight: f64,
    pub category_weight: f64,
    pub description_weight: f64,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            title_weight: defaults::DEFAULT_TITLE_WEIGHT,
            category_weight: defaults::DEFAULT_CATEGORY_WEIGHT,
            description_weight: defaults::DEFAULT_DESCRIPTION_WEIGHT,
        }
    }
}
