pub mod fusion;
pub mod reranker;

pub use fusion::{fuse, HybridFusion};
pub use reranker::{LlmReranker, RerankOutcome};
