use aisle_core::errors::*;

#[test]
fn load_error_empty_catalog_carries_row_count() {
    let err = LoadError::EmptyCatalog { rows_read: 42 };
    assert!(err.to_string().contains("42"));
}

#[test]
fn request_error_negative_k_carries_value() {
    let err = RequestError::NegativeK { k: -3 };
    assert!(err.to_string().contains("-3"));
}

#[test]
fn rerank_error_missing_credential_names_env_var() {
    let err = RerankError::MissingCredential {
        env_var: "GROQ_API_KEY".into(),
    };
    assert!(err.to_string().contains("GROQ_API_KEY"));
}

#[test]
fn embedding_timeout_carries_provider_and_duration() {
    let err = EmbeddingError::Timeout {
        provider: "http".into(),
        timeout_ms: 5000,
    };
    let msg = err.to_string();
    assert!(msg.contains("http"));
    assert!(msg.contains("5000"));
}

// --- From impls ---

#[test]
fn load_error_converts_to_aisle_error() {
    let err: AisleError = LoadError::SourceUnreadable {
        path: "x.csv".into(),
        reason: "not found".into(),
    }
    .into();
    assert!(matches!(err, AisleError::Load(_)));
    assert!(err.to_string().contains("x.csv"));
    assert!(!err.is_request_error());
}

#[test]
fn request_error_converts_and_is_request_error() {
    let err: AisleError = RequestError::EmptyQuery.into();
    assert!(matches!(err, AisleError::InvalidRequest(RequestError::EmptyQuery)));
    assert!(err.is_request_error());
}

#[test]
fn cancelled_is_a_request_error() {
    assert!(AisleError::Cancelled.is_request_error());
}

#[test]
fn embedding_error_converts_to_aisle_error() {
    let err: AisleError = EmbeddingError::DimensionMismatch {
        expected: 384,
        actual: 128,
    }
    .into();
    assert!(matches!(err, AisleError::Embedding(_)));
}
