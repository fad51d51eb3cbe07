//! Product vectors aligned with catalog positions.

use std::sync::Arc;

use aisle_core::models::{Catalog, ScoreMap};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::engine::EmbeddingEngine;
use crate::similarity::unit_cosine;

/// Outcome of computing vectors for products that had none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WarmupReport {
    pub requested: usize,
    pub embedded: usize,
    pub failed_batches: usize,
}

/// Read-only product embeddings, indexed by catalog position.
///
/// Built once per catalog and shared across queries.
#[derive(Debug, Clone, Default)]
pub struct ProductVectors {
    vectors: Vec<Option<Arc<[f32]>>>,
}

impl ProductVectors {
    /// Take the vectors already present in the catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let vectors = catalog
            .iter()
            .map(|p| p.embedding.as_deref().map(Arc::from))
            .collect();
        Self { vectors }
    }

    /// Embed every product that has no vector, `batch_size` texts at a time.
    ///
    /// A failed batch leaves its products without vectors and moves on.
    pub fn warm_up(
        &mut self,
        catalog: &Catalog,
        engine: &EmbeddingEngine,
        batch_size: usize,
    ) -> WarmupReport {
        let missing: Vec<usize> = (0..self.vectors.len())
            .filter(|&pos| self.vectors[pos].is_none())
            .collect();
        let mut report = WarmupReport {
            requested: missing.len(),
            ..Default::default()
        };

        for chunk in missing.chunks(batch_size.max(1)) {
            let texts: Vec<String> = chunk
                .iter()
                .map(|&pos| catalog.products()[pos].search_text.clone())
                .collect();
            match engine.embed_batch(&texts) {
                Ok(vectors) => {
                    for (&pos, v) in chunk.iter().zip(vectors) {
                        self.vectors[pos] = Some(Arc::from(v));
                        report.embedded += 1;
                    }
                }
                Err(e) => {
                    warn!(error = %e, batch = chunk.len(), "product embedding batch failed");
                    report.failed_batches += 1;
                }
            }
        }

        info!(
            provider = engine.provider_name(),
            requested = report.requested,
            embedded = report.embedded,
            failed_batches = report.failed_batches,
            "product vectors warmed up"
        );
        report
    }

    /// Similarity of every product vector to `query`, on the `[0, 1]` scale.
    ///
    /// Products without a vector, with a zero-norm vector, or with a
    /// dimension different from the query are absent from the map.
    pub fn similarities(&self, catalog: &Catalog, query: &[f32]) -> ScoreMap {
        self.vectors
            .par_iter()
            .zip(catalog.products().par_iter())
            .filter_map(|(vector, product)| {
                let score = unit_cosine(vector.as_deref()?, query)?;
                Some((product.id.clone(), score))
            })
            .collect()
    }

    /// Dimension of the first stored vector. The loader keeps dimensions
    /// consistent, so this is the dimension of every catalog vector.
    pub fn dimensions(&self) -> Option<usize> {
        self.vectors.iter().flatten().map(|v| v.len()).next()
    }

    pub fn get(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position)?.as_deref()
    }

    /// Number of products that have a vector.
    pub fn len(&self) -> usize {
        self.vectors.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisle_core::models::ProductRecord;
    use aisle_core::traits::IEmbeddingProvider;

    use crate::providers::HashedProvider;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ProductRecord::new("a", "red shoes").with_embedding(vec![1.0, 0.0]),
            ProductRecord::new("b", "blue shoes").with_embedding(vec![0.0, 1.0]),
            ProductRecord::new("c", "lamp"),
        ])
        .unwrap()
    }

    #[test]
    fn missing_vectors_are_absent() {
        let catalog = catalog();
        let vectors = ProductVectors::from_catalog(&catalog);
        assert_eq!(vectors.len(), 2);
        let scores = vectors.similarities(&catalog, &[1.0, 0.0]);
        assert!((scores["a"] - 1.0).abs() < 1e-9);
        assert!((scores["b"] - 0.5).abs() < 1e-9);
        assert!(!scores.contains_key("c"));
    }

    #[test]
    fn mismatched_query_dimension_scores_nothing() {
        let catalog = catalog();
        let vectors = ProductVectors::from_catalog(&catalog);
        assert!(vectors.similarities(&catalog, &[1.0, 0.0, 0.0]).is_empty());
    }

    #[test]
    fn warm_up_fills_gaps_only() {
        let catalog = Catalog::new(vec![
            ProductRecord::new("a", "red shoes"),
            ProductRecord::new("b", "kettle"),
        ])
        .unwrap();
        let engine = EmbeddingEngine::new(Box::new(HashedProvider::new(16)), 10);
        let mut vectors = ProductVectors::from_catalog(&catalog);
        let report = vectors.warm_up(&catalog, &engine, 1);
        assert_eq!(report.requested, 2);
        assert_eq!(report.embedded, 2);
        assert_eq!(report.failed_batches, 0);
        assert_eq!(
            vectors.get(0).map(<[f32]>::to_vec),
            Some(HashedProvider::new(16).embed("red shoes").unwrap())
        );
    }
}
