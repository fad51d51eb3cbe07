//! Weighted score fusion of the lexical and embedding signals.
//!
//! `fused = (w_l·lex + w_e·emb) / (w_l + w_e)` when the product has an
//! embedding score, otherwise `fused = lex`. Missing signals are never
//! zero-filled. An optional rating prior blends in `rating / 5`.

use std::cmp::Ordering;
use std::collections::HashSet;

use aisle_core::config::FusionConfig;
use aisle_core::constants::MAX_RATING;
use aisle_core::errors::ConfigError;
use aisle_core::models::{Catalog, ScoreMap, ScoredCandidate, SignalSource};
use tracing::{debug, error};

/// Validated fusion weights.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridFusion {
    weights: FusionConfig,
}

impl HybridFusion {
    /// # Errors
    /// `ConfigError::InvalidValue` for negative, non-finite or all-zero weights.
    pub fn new(weights: FusionConfig) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &FusionConfig {
        &self.weights
    }

    /// Fuse the two signals without a rating prior.
    pub fn fuse(&self, lexical: &ScoreMap, embedding: Option<&ScoreMap>) -> Vec<ScoredCandidate> {
        self.fuse_inner(lexical, embedding, None)
    }

    /// Fuse the two signals, applying the rating prior from `catalog`.
    pub fn fuse_with_ratings(
        &self,
        lexical: &ScoreMap,
        embedding: Option<&ScoreMap>,
        catalog: &Catalog,
    ) -> Vec<ScoredCandidate> {
        self.fuse_inner(lexical, embedding, Some(catalog))
    }

    fn fuse_inner(
        &self,
        lexical: &ScoreMap,
        embedding: Option<&ScoreMap>,
        catalog: Option<&Catalog>,
    ) -> Vec<ScoredCandidate> {
        let w = &self.weights;
        let embedding = embedding.filter(|m| !m.is_empty());

        let mut ids: HashSet<&str> = lexical.keys().map(String::as_str).collect();
        if let Some(emb) = embedding {
            ids.extend(emb.keys().map(String::as_str));
        }

        let mut candidates: Vec<ScoredCandidate> = ids
            .into_iter()
            .filter_map(|id| {
                let lex = finite_or_zero(lexical.get(id).copied());
                let emb = embedding
                    .and_then(|m| m.get(id).copied())
                    .filter(|e| e.is_finite());

                let lex_hit = lex > w.min_relevance;
                let emb_hit = emb.is_some_and(|e| e > w.semantic_floor);
                let source = match (lex_hit, emb_hit) {
                    (true, true) => SignalSource::Hybrid,
                    (true, false) => SignalSource::Lexical,
                    (false, true) => SignalSource::Semantic,
                    (false, false) => return None,
                };

                let mut fused = match emb {
                    Some(e) => {
                        (w.lexical_weight * lex + w.embedding_weight * e)
                            / (w.lexical_weight + w.embedding_weight)
                    }
                    None => lex,
                };

                if w.rating_weight > 0.0 {
                    if let Some(rating) = catalog.and_then(|c| c.get(id)).and_then(|p| p.rating) {
                        fused = (1.0 - w.rating_weight) * fused
                            + w.rating_weight * (rating / MAX_RATING).clamp(0.0, 1.0);
                    }
                }

                if !fused.is_finite() {
                    error!(product_id = id, "non-finite fused score dropped");
                    return None;
                }

                Some(ScoredCandidate {
                    product_id: id.to_string(),
                    lexical_score: lex,
                    embedding_score: emb,
                    fused_score: fused.clamp(0.0, 1.0),
                    source,
                })
            })
            .collect();

        candidates.sort_by(compare);
        debug!(candidates = candidates.len(), "fusion complete");
        candidates
    }
}

/// Fuse with the given weights. Candidates with no positive signal are dropped.
///
/// # Errors
/// `ConfigError` when the weights are invalid.
pub fn fuse(
    lexical: &ScoreMap,
    embedding: Option<&ScoreMap>,
    weights: &FusionConfig,
) -> Result<Vec<ScoredCandidate>, ConfigError> {
    Ok(HybridFusion::new(weights.clone())?.fuse(lexical, embedding))
}

/// Descending fused score, then ascending product id.
pub fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.fused_score
        .total_cmp(&a.fused_score)
        .then_with(|| a.product_id.cmp(&b.product_id))
}

fn finite_or_zero(v: Option<f64>) -> f64 {
    v.filter(|x| x.is_finite()).unwrap_or(0.0).clamp(0.0, 1.0)
}
