mod aisle_error;
mod config_error;
mod embedding_error;
mod load_error;
mod rerank_error;
mod request_error;

pub use aisle_error::AisleError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use load_error::LoadError;
pub use rerank_error::RerankError;
pub use request_error::RequestError;

/// Convenience alias used across the workspace.
pub type AisleResult<T> = Result<T, AisleError>;
