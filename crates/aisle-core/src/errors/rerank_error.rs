/// LLM re-ranking errors. Always recovered by falling back to fused order.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("no LLM credential configured (looked for {env_var})")]
    MissingCredential { env_var: String },

    #[error("LLM client is not configured")]
    NotConfigured,

    #[error("LLM request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("LLM request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("LLM endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("malformed LLM response: {reason}")]
    MalformedResponse { reason: String },
}
