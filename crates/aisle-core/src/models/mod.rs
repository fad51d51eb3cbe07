mod candidate;
mod catalog;
mod degradation_event;
mod product;
mod ranking_status;
mod recommendation;

pub use candidate::{ScoreMap, ScoredCandidate, SignalSource};
pub use catalog::Catalog;
pub use degradation_event::{DegradationEvent, DegradationKind};
pub use product::{ProductId, ProductRecord};
pub use ranking_status::{EmbeddingStatus, RankingStatus, RerankStatus};
pub use recommendation::{Recommendation, RecommendationResult};
