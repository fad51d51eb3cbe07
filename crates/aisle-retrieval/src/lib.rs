//! # aisle-retrieval
//!
//! The recommendation pipeline:
//! - `search::lexical`: TF-IDF cosine over title, category, description
//! - `search::semantic`: embedding similarity against product vectors
//! - `ranking::fusion`: weighted fusion with relevance floors
//! - `ranking::reranker`: optional LLM re-ranking of the head
//! - `assembler`: truncation and catalog join
//! - `engine`: `RecommendationEngine`, tying it together

pub mod assembler;
pub mod engine;
pub mod llm;
pub mod ranking;
pub mod search;

pub use engine::{RecommendationEngine, RecommendationEngineBuilder};
pub use ranking::{fuse, HybridFusion, LlmReranker, RerankOutcome};
pub use search::{EmbeddingOutcome, EmbeddingRetriever, LexicalIndex};
