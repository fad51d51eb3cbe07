mod embedding;
mod llm;

pub use embedding::IEmbeddingProvider;
pub use llm::ILlmClient;
