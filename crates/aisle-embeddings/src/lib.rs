//! # aisle-embeddings
//!
//! Semantic signal plumbing for the recommender:
//! - providers: `hashed` (offline TF-IDF hashing), `http` (OpenAI-compatible
//!   `/embeddings`), `onnx` (feature-gated local model)
//! - an in-memory query embedding cache keyed by blake3 hash
//! - `ProductVectors`, the read-only index of product embeddings
//! - cosine similarity mapped onto `[0, 1]`

pub mod cache;
pub mod engine;
pub mod index;
pub mod providers;
pub mod similarity;

pub use engine::EmbeddingEngine;
pub use index::{ProductVectors, WarmupReport};
