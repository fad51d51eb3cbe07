/// Aisle system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of the rating scale used by catalog sources.
pub const MAX_RATING: f64 = 5.0;

/// Minimum token length (in chars) kept by the tokenizer.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Component names used in degradation events and log fields.
pub const COMPONENT_EMBEDDINGS: &str = "embeddings";
pub const COMPONENT_RERANK: &str = "llm-rerank";
