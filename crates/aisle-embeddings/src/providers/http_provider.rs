//! OpenAI-compatible `/embeddings` HTTP provider.
//!
//! Blocking `reqwest` client with a per-request timeout. The credential is
//! resolved once at construction; a missing key is reported on every call
//! rather than at startup.

use std::time::Duration;

use aisle_core::config::EmbeddingConfig;
use aisle_core::errors::{AisleResult, EmbeddingError};
use aisle_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct HttpProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimensions: usize,
    timeout_ms: u64,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl HttpProvider {
    /// # Errors
    /// `EmbeddingError::ProviderUnavailable` if the HTTP client cannot be built.
    pub fn from_config(config: &EmbeddingConfig) -> AisleResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("http ({e})"),
            })?;

        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                env_var = %config.api_key_env,
                "no embedding API key configured; semantic signal will be unavailable"
            );
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            dimensions: config.dimensions,
            timeout_ms: config.request_timeout_ms,
        })
    }

    fn request(&self, texts: &[String]) -> AisleResult<Vec<Vec<f32>>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(EmbeddingError::MissingCredential {
                provider: self.name().to_string(),
            }
            .into());
        };

        debug!(endpoint = %self.endpoint, inputs = texts.len(), "embedding request");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("endpoint returned {status}: {}", truncate(&body, 200)),
            }
            .into());
        }

        let mut parsed: EmbedResponse =
            response.json().map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("invalid response body: {e}"),
            })?;

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "expected {} embeddings, received {}",
                    texts.len(),
                    parsed.data.len()
                ),
            }
            .into());
        }

        parsed.data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));
        parsed
            .data
            .into_iter()
            .map(|d| {
                if d.embedding.len() != self.dimensions {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.dimensions,
                        actual: d.embedding.len(),
                    }
                    .into());
                }
                Ok(d.embedding)
            })
            .collect()
    }

    fn transport_error(&self, e: reqwest::Error) -> aisle_core::AisleError {
        if e.is_timeout() {
            EmbeddingError::Timeout {
                provider: self.name().to_string(),
                timeout_ms: self.timeout_ms,
            }
            .into()
        } else {
            EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            }
            .into()
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

impl IEmbeddingProvider for HttpProvider {
    fn embed(&self, text: &str) -> AisleResult<Vec<f32>> {
        let input = [text.to_string()];
        self.request(&input)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: "empty response".to_string(),
                }
                .into()
            })
    }

    fn embed_batch(&self, texts: &[String]) -> AisleResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}
