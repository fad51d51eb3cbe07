//! Hashed TF-IDF embedding provider.
//!
//! Projects weighted unigrams and adjacent-token bigrams into a fixed number
//! of buckets with FNV-1a. Deterministic and fully offline, so it doubles as
//! the test backend for the semantic signal.

use std::collections::BTreeMap;

use aisle_core::errors::AisleResult;
use aisle_core::text;
use aisle_core::traits::IEmbeddingProvider;

use crate::similarity::l2_normalize;

/// Bigrams contribute at half the weight of single terms.
const BIGRAM_WEIGHT: f32 = 0.5;

pub struct HashedProvider {
    dimensions: usize,
}

impl HashedProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, feature: &str) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in feature.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % self.dimensions as u64) as usize
    }

    fn vectorize(&self, input: &str) -> Vec<f32> {
        let tokens = text::tokenize(input);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        // Ordered so colliding features accumulate into a bucket in a fixed order.
        let mut tf: BTreeMap<String, f32> = BTreeMap::new();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_default() += 1.0;
        }
        for pair in tokens.windows(2) {
            *tf.entry(format!("{} {}", pair[0], pair[1])).or_default() += BIGRAM_WEIGHT;
        }

        for (feature, count) in &tf {
            // Sub-linear tf; longer terms are rarer and get a mild boost.
            let weight = (1.0 + count.ln()) * (1.0 + (feature.len() as f32).ln());
            vec[self.bucket(feature)] += weight;
        }

        l2_normalize(&mut vec);
        vec
    }
}

impl IEmbeddingProvider for HashedProvider {
    fn embed(&self, text: &str) -> AisleResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> AisleResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed"
    }

    fn is_available(&self) -> bool {
        true
    }
}
