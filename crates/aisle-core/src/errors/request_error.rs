/// Per-call validation errors, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("query text must not be empty")]
    EmptyQuery,

    #[error("k must be >= 0, got {k}")]
    NegativeK { k: i64 },
}
