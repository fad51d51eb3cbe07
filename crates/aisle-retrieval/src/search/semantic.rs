//! Embedding retrieval: query vector against precomputed product vectors.

use aisle_core::config::EmbeddingConfig;
use aisle_core::errors::{AisleError, AisleResult, EmbeddingError};
use aisle_core::models::{Catalog, ScoreMap};
use aisle_core::CancellationToken;
use aisle_embeddings::{EmbeddingEngine, ProductVectors};
use tracing::{debug, warn};

/// Result of the embedding signal for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingOutcome {
    /// Similarities in `[0, 1]`; products without a usable vector are absent.
    Scored(ScoreMap),
    /// No backend configured.
    Disabled,
    /// Backend configured but failed for this query.
    Unavailable { reason: String },
}

impl EmbeddingOutcome {
    pub fn scores(&self) -> Option<&ScoreMap> {
        match self {
            Self::Scored(scores) => Some(scores),
            _ => None,
        }
    }
}

/// Owns the embedding engine and the product vectors it is compared against.
pub struct EmbeddingRetriever {
    engine: Option<EmbeddingEngine>,
    vectors: ProductVectors,
}

impl EmbeddingRetriever {
    pub fn disabled() -> Self {
        Self {
            engine: None,
            vectors: ProductVectors::default(),
        }
    }

    /// Index the catalog's vectors, embedding the missing ones when
    /// `embed_missing_products` is set and the provider reports itself available.
    pub fn new(engine: EmbeddingEngine, catalog: &Catalog, config: &EmbeddingConfig) -> Self {
        let mut vectors = ProductVectors::from_catalog(catalog);
        if config.embed_missing_products && engine.is_available() {
            vectors.warm_up(catalog, &engine, config.batch_size);
        }
        Self {
            engine: Some(engine),
            vectors,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }

    pub fn vectors(&self) -> &ProductVectors {
        &self.vectors
    }

    /// # Errors
    /// `AisleError::Cancelled` if the token is set before the backend is called.
    pub fn score(
        &self,
        query: &str,
        catalog: &Catalog,
        cancel: &CancellationToken,
    ) -> AisleResult<EmbeddingOutcome> {
        let Some(engine) = &self.engine else {
            return Ok(EmbeddingOutcome::Disabled);
        };
        if cancel.is_cancelled() {
            return Err(AisleError::Cancelled);
        }

        let query_vec = match engine.embed_query(query) {
            Ok(v) => v,
            Err(e) => {
                warn!(provider = engine.provider_name(), error = %e, "query embedding failed");
                return Ok(EmbeddingOutcome::Unavailable {
                    reason: e.to_string(),
                });
            }
        };

        if let Some(dims) = self.vectors.dimensions() {
            if dims != query_vec.len() {
                let e = EmbeddingError::DimensionMismatch {
                    expected: dims,
                    actual: query_vec.len(),
                };
                warn!(provider = engine.provider_name(), error = %e, "query and product vectors disagree");
                return Ok(EmbeddingOutcome::Unavailable {
                    reason: e.to_string(),
                });
            }
        }

        let scores = self.vectors.similarities(catalog, &query_vec);
        debug!(scored = scores.len(), "embedding similarities computed");
        Ok(EmbeddingOutcome::Scored(scores))
    }
}
