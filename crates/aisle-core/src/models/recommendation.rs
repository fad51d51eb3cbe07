use serde::{Deserialize, Serialize};

use super::candidate::SignalSource;
use super::degradation_event::DegradationEvent;
use super::product::ProductRecord;
use super::ranking_status::RankingStatus;

/// One ranked product returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub product: ProductRecord,
    /// Final fused score in [0, 1]. Always finite.
    pub score: f64,
    /// 1-based position in the final ranking.
    pub rank: usize,
    pub lexical_score: f64,
    pub embedding_score: Option<f64>,
    pub source: SignalSource,
}

/// The ranked answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub query: String,
    pub items: Vec<Recommendation>,
    pub status: RankingStatus,
    pub degradations: Vec<DegradationEvent>,
}

impl RecommendationResult {
    pub fn empty(query: impl Into<String>, status: RankingStatus) -> Self {
        Self {
            query: query.into(),
            items: Vec::new(),
            status,
            degradations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_degraded(&self) -> bool {
        self.status.is_degraded()
    }

    /// Product ids in ranked order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|r| r.product.id.as_str()).collect()
    }
}
