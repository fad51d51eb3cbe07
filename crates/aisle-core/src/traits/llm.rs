use crate::errors::RerankError;

/// A chat-style LLM endpoint used for re-ranking.
pub trait ILlmClient: Send + Sync {
    /// Send a system + user prompt pair and return the raw completion text.
    fn complete(&self, system: &str, prompt: &str) -> Result<String, RerankError>;

    /// Human-readable client name (model or endpoint).
    fn name(&self) -> &str;

    /// Whether the client has what it needs (credential, endpoint) to make a call.
    fn is_configured(&self) -> bool;
}
