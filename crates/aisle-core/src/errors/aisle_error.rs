use super::{ConfigError, EmbeddingError, LoadError, RerankError, RequestError};

/// Top-level error for the recommender.
///
/// Only `Load`, `Config`, `InvalidRequest` and `Cancelled` ever reach a caller
/// of `get_recommendations`. Embedding and re-rank failures are folded into
/// a degraded ranking before the engine returns.
#[derive(Debug, thiserror::Error)]
pub enum AisleError {
    #[error("catalog load error: {0}")]
    Load(#[from] LoadError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("rerank error: {0}")]
    Rerank(#[from] RerankError),

    #[error("request cancelled by caller")]
    Cancelled,
}

impl AisleError {
    /// Whether the error was caused by the caller rather than the engine.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::Cancelled)
    }
}
