//! Final result assembly: truncate, join catalog fields, assign ranks.

use aisle_core::models::{Catalog, Recommendation, ScoredCandidate};
use tracing::error;

/// Take the first `k` candidates and join them to their catalog records.
///
/// Ranks are 1-based and contiguous. A candidate with a non-finite score or
/// an id missing from the catalog is skipped and logged.
pub fn assemble(ranked: &[ScoredCandidate], k: usize, catalog: &Catalog) -> Vec<Recommendation> {
    let mut items = Vec::with_capacity(k.min(ranked.len()));
    for candidate in ranked {
        if items.len() == k {
            break;
        }
        if !candidate.fused_score.is_finite() {
            error!(product_id = %candidate.product_id, "non-finite score reached the assembler");
            continue;
        }
        let Some(product) = catalog.get(&candidate.product_id) else {
            error!(product_id = %candidate.product_id, "candidate not in catalog");
            continue;
        };
        items.push(Recommendation {
            product: product.clone(),
            score: candidate.fused_score,
            rank: items.len() + 1,
            lexical_score: candidate.lexical_score,
            embedding_score: candidate.embedding_score,
            source: candidate.source,
        });
    }
    items
}
