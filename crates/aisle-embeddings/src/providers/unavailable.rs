//! Placeholder for a configured backend that could not be constructed.
//!
//! Every call fails with the construction error, so each query reports the
//! embedding signal as unavailable instead of silently disabling it.

use aisle_core::errors::{AisleResult, EmbeddingError};
use aisle_core::traits::IEmbeddingProvider;

pub struct UnavailableProvider {
    name: String,
    dimensions: usize,
    reason: String,
}

impl UnavailableProvider {
    pub fn new(name: impl Into<String>, dimensions: usize, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimensions,
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> AisleResult<T> {
        Err(EmbeddingError::ProviderUnavailable {
            provider: format!("{} ({})", self.name, self.reason),
        }
        .into())
    }
}

impl IEmbeddingProvider for UnavailableProvider {
    fn embed(&self, _text: &str) -> AisleResult<Vec<f32>> {
        self.fail()
    }

    fn embed_batch(&self, _texts: &[String]) -> AisleResult<Vec<Vec<f32>>> {
        self.fail()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        false
    }
}
