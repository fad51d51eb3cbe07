use serde::{Deserialize, Serialize};

use super::defaults;

/// LLM re-ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Number of fused candidates sent to the LLM.
    pub top_n: usize,
    /// OpenAI-compatible chat-completions endpoint.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub request_timeout_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            top_n: defaults::DEFAULT_RERANK_TOP_N,
            endpoint: defaults::DEFAULT_RERANK_ENDPOINT.to_string(),
            model: defaults::DEFAULT_RERANK_MODEL.to_string(),
            api_key: None,
            api_key_env: defaults::DEFAULT_RERANK_API_KEY_ENV.to_string(),
            request_timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
            temperature: 0.0,
            max_tokens: defaults::DEFAULT_RERANK_MAX_TOKENS,
        }
    }
}

impl RerankConfig {
    /// Resolve the API key from the inline value or the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        super::resolve_secret(self.api_key.as_deref(), &self.api_key_env)
    }
}
