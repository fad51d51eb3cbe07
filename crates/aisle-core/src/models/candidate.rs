use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::product::ProductId;

/// Per-product scores produced by a single retrieval signal.
pub type ScoreMap = HashMap<ProductId, f64>;

/// Which retrieval signal(s) matched a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    Lexical,
    Semantic,
    Hybrid,
}

/// A candidate after fusion. Lives for a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub product_id: ProductId,
    /// TF-IDF cosine similarity in [0, 1].
    pub lexical_score: f64,
    /// Embedding similarity in [0, 1]; `None` when no vector was available.
    pub embedding_score: Option<f64>,
    /// Combined score in [0, 1].
    pub fused_score: f64,
    pub source: SignalSource,
}
