use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of optional signal was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationKind {
    /// Embedding retrieval unavailable; ranking is lexical-only.
    RetrievalDegraded,
    /// LLM re-ranking failed; fused order returned unchanged.
    RerankFailed,
}

/// A degradation event when a subsystem falls back to a lower-quality mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub kind: DegradationKind,
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn new(
        kind: DegradationKind,
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}
