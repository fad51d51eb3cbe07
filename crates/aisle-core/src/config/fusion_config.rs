use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Hybrid fusion weights and relevance floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub lexical_weight: f64,
    pub embedding_weight: f64,
    /// Blend factor in [0, 1] for the normalized product rating.
    pub rating_weight: f64,
    /// Lexical scores must be strictly above this to count as a match.
    pub min_relevance: f64,
    /// Embedding scores must be strictly above this to count as a match.
    pub semantic_floor: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            lexical_weight: defaults::DEFAULT_LEXICAL_WEIGHT,
            embedding_weight: defaults::DEFAULT_EMBEDDING_WEIGHT,
            rating_weight: defaults::DEFAULT_RATING_WEIGHT,
            min_relevance: defaults::DEFAULT_MIN_RELEVANCE,
            semantic_floor: defaults::DEFAULT_SEMANTIC_FLOOR,
        }
    }
}

impl FusionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("fusion.lexical_weight", self.lexical_weight),
            ("fusion.embedding_weight", self.embedding_weight),
            ("fusion.rating_weight", self.rating_weight),
            ("fusion.min_relevance", self.min_relevance),
            ("fusion.semantic_floor", self.semantic_floor),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must be finite and >= 0, got {value}"),
                });
            }
        }
        if self.lexical_weight + self.embedding_weight <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "fusion".to_string(),
                reason: "lexical_weight + embedding_weight must be > 0".to_string(),
            });
        }
        if self.rating_weight > 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "fusion.rating_weight".to_string(),
                reason: format!("must be <= 1.0, got {}", self.rating_weight),
            });
        }
        Ok(())
    }
}
