//! Configuration for every subsystem, loaded from TOML.

mod catalog_config;
pub mod defaults;
mod embedding_config;
mod fusion_config;
mod lexical_config;
mod observability_config;
mod rerank_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use catalog_config::CatalogConfig;
pub use embedding_config::EmbeddingConfig;
pub use fusion_config::FusionConfig;
pub use lexical_config::LexicalConfig;
pub use observability_config::ObservabilityConfig;
pub use rerank_config::RerankConfig;

use crate::errors::ConfigError;

/// Embedding provider names accepted in `embedding.provider`.
pub const KNOWN_PROVIDERS: &[&str] = &["none", "hashed", "http", "onnx"];

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AisleConfig {
    pub catalog: CatalogConfig,
    pub lexical: LexicalConfig,
    pub embedding: EmbeddingConfig,
    pub fusion: FusionConfig,
    pub rerank: RerankConfig,
    pub observability: ObservabilityConfig,
}

impl AisleConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fusion.validate()?;

        let provider = self.embedding.provider.to_ascii_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(ConfigError::UnknownProvider {
                name: self.embedding.provider.clone(),
            });
        }
        if self.embedding.is_enabled() && self.embedding.dimensions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "embedding.dimensions".to_string(),
                reason: "must be > 0 when a provider is configured".to_string(),
            });
        }
        if self.embedding.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "embedding.batch_size".to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        for (field, weight) in [
            ("lexical.title_weight", self.lexical.title_weight),
            ("lexical.category_weight", self.lexical.category_weight),
            ("lexical.description_weight", self.lexical.description_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must be finite and >= 0, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

/// Inline secret wins; otherwise read the named environment variable.
/// Blank values count as missing.
fn resolve_secret(inline: Option<&str>, env_var: &str) -> Option<String> {
    inline
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| {
            if env_var.is_empty() {
                return None;
            }
            std::env::var(env_var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
}
