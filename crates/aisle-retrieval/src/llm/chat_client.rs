//! OpenAI-compatible `/chat/completions` client (Groq by default).

use std::time::Duration;

use aisle_core::config::RerankConfig;
use aisle_core::errors::RerankError;
use aisle_core::traits::ILlmClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Blocking chat-completions client with a per-request timeout.
///
/// A client without a credential still constructs; every call then fails
/// with `RerankError::MissingCredential` and the caller falls back.
pub struct ChatCompletionsClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    timeout_ms: u64,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    /// # Errors
    /// `RerankError::RequestFailed` if the HTTP client cannot be built.
    pub fn from_config(config: &RerankConfig) -> Result<Self, RerankError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| RerankError::RequestFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            timeout_ms: config.request_timeout_ms,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> RerankError {
        if e.is_timeout() {
            RerankError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            RerankError::RequestFailed {
                reason: e.to_string(),
            }
        }
    }
}

impl ILlmClient for ChatCompletionsClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, RerankError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RerankError::MissingCredential {
                env_var: self.api_key_env.clone(),
            });
        };

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "chat completion request");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            return Err(RerankError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().map_err(|e| RerankError::MalformedResponse {
            reason: e.to_string(),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| RerankError::MalformedResponse {
                reason: "response had no message content".to_string(),
            })
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some() && !self.endpoint.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unkeyed() -> RerankConfig {
        RerankConfig {
            api_key: None,
            api_key_env: "AISLE_TEST_UNSET_LLM_KEY".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_key_fails_without_network() {
        let client = ChatCompletionsClient::from_config(&unkeyed()).unwrap();
        assert!(!client.is_configured());
        let err = client.complete("sys", "prompt").unwrap_err();
        assert!(
            matches!(err, RerankError::MissingCredential { ref env_var } if env_var == "AISLE_TEST_UNSET_LLM_KEY")
        );
    }

    #[test]
    fn inline_key_configures_client() {
        let config = RerankConfig {
            api_key: Some("gsk_test".to_string()),
            ..unkeyed()
        };
        let client = ChatCompletionsClient::from_config(&config).unwrap();
        assert!(client.is_configured());
        assert_eq!(client.name(), "llama-3.1-8b-instant");
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(ChatRequest {
            model: "m",
            messages: [
                ChatMessage { role: "system", content: "s" },
                ChatMessage { role: "user", content: "u" },
            ],
            temperature: 0.0,
            max_tokens: 64,
        })
        .unwrap();
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 64);
    }

    #[test]
    fn response_content_extracted() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":"[\"a\"]"}}]}"#)
                .unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("[\"a\"]")
        );
    }
}
