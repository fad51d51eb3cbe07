//! Embedding backends and their construction from config.
//!
//! | provider | backend |
//! |---|---|
//! | `none` | no semantic signal |
//! | `hashed` | offline TF-IDF hashing |
//! | `http` | OpenAI-compatible `/embeddings` |
//! | `onnx` | local model via `ort` (feature `onnx`) |

pub mod hashed;
pub mod http_provider;
#[cfg(feature = "onnx")]
pub mod onnx_provider;
pub mod unavailable;

pub use hashed::HashedProvider;
pub use http_provider::HttpProvider;
#[cfg(feature = "onnx")]
pub use onnx_provider::OnnxProvider;
pub use unavailable::UnavailableProvider;

use aisle_core::config::EmbeddingConfig;
use aisle_core::errors::{AisleResult, ConfigError};
use aisle_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Build the configured provider. `Ok(None)` when embeddings are disabled.
///
/// A backend that fails to construct becomes an [`UnavailableProvider`], so
/// queries degrade to lexical-only instead of failing startup.
///
/// # Errors
/// `ConfigError::UnknownProvider` for names outside the supported set.
pub fn create_provider(
    config: &EmbeddingConfig,
) -> AisleResult<Option<Box<dyn IEmbeddingProvider>>> {
    let provider = config.provider.to_ascii_lowercase();
    let boxed: Box<dyn IEmbeddingProvider> = match provider.as_str() {
        "" | "none" => {
            info!("embedding provider disabled");
            return Ok(None);
        }
        "hashed" => Box::new(HashedProvider::new(config.dimensions)),
        "http" => match HttpProvider::from_config(config) {
            Ok(p) => Box::new(p),
            Err(e) => unavailable("http", config, e.to_string()),
        },
        "onnx" => load_onnx(config),
        _ => {
            return Err(ConfigError::UnknownProvider {
                name: config.provider.clone(),
            }
            .into())
        }
    };
    info!(
        provider = boxed.name(),
        dims = boxed.dimensions(),
        available = boxed.is_available(),
        "embedding provider ready"
    );
    Ok(Some(boxed))
}

#[cfg(feature = "onnx")]
fn load_onnx(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match OnnxProvider::load(&config.model_path, config.dimensions) {
        Ok(p) => Box::new(p),
        Err(e) => unavailable("onnx", config, e.to_string()),
    }
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    unavailable(
        "onnx",
        config,
        "built without the `onnx` feature".to_string(),
    )
}

fn unavailable(
    name: &str,
    config: &EmbeddingConfig,
    reason: String,
) -> Box<dyn IEmbeddingProvider> {
    warn!(provider = name, %reason, "embedding provider could not be constructed");
    Box::new(UnavailableProvider::new(name, config.dimensions, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: provider.to_string(),
            dimensions: 32,
            ..Default::default()
        }
    }

    #[test]
    fn none_is_disabled() {
        assert!(create_provider(&config("none")).unwrap().is_none());
        assert!(create_provider(&config("")).unwrap().is_none());
    }

    #[test]
    fn hashed_is_case_insensitive() {
        let p = create_provider(&config("Hashed")).unwrap().unwrap();
        assert_eq!(p.name(), "hashed");
        assert_eq!(p.dimensions(), 32);
    }

    #[test]
    fn unknown_provider_rejected() {
        assert!(create_provider(&config("word2vec")).is_err());
    }

    #[test]
    fn onnx_without_model_is_unavailable() {
        let p = create_provider(&config("onnx")).unwrap().unwrap();
        assert!(!p.is_available());
        assert!(p.embed("anything").is_err());
    }
}
