use serde::{Deserialize, Serialize};

/// Outcome of the embedding signal for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmbeddingStatus {
    /// Embedding scores were computed for `scored` products.
    Used { scored: usize },
    /// No embedding backend configured.
    Disabled,
    /// Backend configured but failed for this query.
    Unavailable { reason: String },
}

/// Outcome of the LLM re-ranking pass for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RerankStatus {
    NotRequested,
    /// The head of the ranking was reordered by the LLM.
    Applied { reranked: usize },
    /// Re-ranking failed; fused order kept.
    FellBack { reason: String },
}

/// Tagged description of how a ranking was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingStatus {
    pub embeddings: EmbeddingStatus,
    pub rerank: RerankStatus,
}

impl RankingStatus {
    /// True when a configured or requested signal could not be used.
    pub fn is_degraded(&self) -> bool {
        matches!(self.embeddings, EmbeddingStatus::Unavailable { .. })
            || matches!(self.rerank, RerankStatus::FellBack { .. })
    }
}

impl Default for RankingStatus {
    fn default() -> Self {
        Self {
            embeddings: EmbeddingStatus::Disabled,
            rerank: RerankStatus::NotRequested,
        }
    }
}
