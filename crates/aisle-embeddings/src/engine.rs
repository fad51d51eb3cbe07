//! EmbeddingEngine: a provider plus the query embedding cache.

use std::sync::Arc;

use aisle_core::config::EmbeddingConfig;
use aisle_core::errors::{AisleResult, EmbeddingError};
use aisle_core::text;
use aisle_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::{self, L1MemoryCache};
use crate::providers;

/// Embeds queries and product texts through a single provider.
///
/// Every vector leaving the engine has the provider's dimension and only
/// finite components. Query vectors are cached by folded text, so
/// `"Red Shoes"` and `"red  shoes"` share an entry.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: L1MemoryCache,
}

impl EmbeddingEngine {
    pub fn new(provider: Box<dyn IEmbeddingProvider>, l1_cache_size: u64) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            l1_cache_size,
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache: L1MemoryCache::new(l1_cache_size),
        }
    }

    /// Build from config. `Ok(None)` when no provider is configured.
    pub fn from_config(config: &EmbeddingConfig) -> AisleResult<Option<Self>> {
        Ok(providers::create_provider(config)?
            .map(|provider| Self::new(provider, config.l1_cache_size)))
    }

    /// Embed a query, consulting the cache first.
    pub fn embed_query(&self, query: &str) -> AisleResult<Arc<[f32]>> {
        let folded = text::fold(query);
        let key = cache::query_key(self.provider.name(), &folded);

        if let Some(hit) = self.cache.get(&key) {
            debug!(provider = self.provider.name(), "query embedding cache hit");
            return Ok(hit);
        }

        let vector = self.provider.embed(&folded)?;
        self.check(&vector)?;
        let vector: Arc<[f32]> = Arc::from(vector);
        self.cache.insert(key, Arc::clone(&vector));
        Ok(vector)
    }

    /// Embed product texts without caching.
    pub fn embed_batch(&self, texts: &[String]) -> AisleResult<Vec<Vec<f32>>> {
        let vectors = self.provider.embed_batch(texts)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "provider returned {} vectors for {} inputs",
                    vectors.len(),
                    texts.len()
                ),
            }
            .into());
        }
        for v in &vectors {
            self.check(v)?;
        }
        Ok(vectors)
    }

    fn check(&self, vector: &[f32]) -> AisleResult<()> {
        let expected = self.provider.dimensions();
        if vector.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: vector.len(),
            }
            .into());
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "provider returned a non-finite component".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    /// Number of cached query embeddings.
    pub fn cached_queries(&self) -> u64 {
        self.cache.len()
    }
}
