//! # aisle-core
//!
//! Foundation crate for the Aisle product recommender.
//! Defines all types, traits, errors, config, and text normalization.
//! Every other crate in the workspace depends on this.

pub mod cancellation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod observability;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancellation::CancellationToken;
pub use config::AisleConfig;
pub use errors::{AisleError, AisleResult};
pub use models::{Catalog, ProductRecord, Recommendation, RecommendationResult, ScoredCandidate};
