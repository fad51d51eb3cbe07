use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// One of `none`, `hashed`, `http`, `onnx`.
    pub provider: String,
    pub dimensions: usize,
    /// OpenAI-compatible `/embeddings` endpoint for the `http` provider.
    pub endpoint: String,
    pub model: String,
    /// Path to the ONNX model for the `onnx` provider.
    pub model_path: String,
    /// Inline API key. Takes precedence over `api_key_env`.
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,
    pub request_timeout_ms: u64,
    pub batch_size: usize,
    /// Max entries in the in-memory query embedding cache.
    pub l1_cache_size: u64,
    /// Compute vectors for products that have none at engine construction.
    pub embed_missing_products: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            model_path: String::new(),
            api_key: None,
            api_key_env: defaults::DEFAULT_EMBEDDING_API_KEY_ENV.to_string(),
            request_timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            embed_missing_products: true,
        }
    }
}

impl EmbeddingConfig {
    /// Whether any embedding backend is configured.
    pub fn is_enabled(&self) -> bool {
        !self.provider.eq_ignore_ascii_case("none") && !self.provider.is_empty()
    }

    /// Resolve the API key from the inline value or the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        super::resolve_secret(self.api_key.as_deref(), &self.api_key_env)
    }
}
