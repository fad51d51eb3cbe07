//! TF-IDF lexical retrieval over title, category and description.
//!
//! - idf: `ln((1 + N) / (1 + df)) + 1`
//! - document tf: field-weighted counts, sub-linear above 1 (`1 + ln tf`)
//! - document and query vectors are L2-normalized, so scores lie in `[0, 1]`

use std::collections::HashMap;

use aisle_core::config::LexicalConfig;
use aisle_core::models::{Catalog, ProductId, ScoreMap};
use aisle_core::text;
use rayon::prelude::*;
use tracing::debug;

type TermId = u32;

/// Forward TF-IDF index, built once per catalog and read-only after.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    vocab: HashMap<String, TermId>,
    idf: Vec<f64>,
    /// Sparse, L2-normalized document vectors sorted by term id.
    docs: Vec<Vec<(TermId, f64)>>,
    ids: Vec<ProductId>,
}

impl LexicalIndex {
    pub fn build(catalog: &Catalog, weights: &LexicalConfig) -> Self {
        let mut vocab: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut raw_docs: Vec<HashMap<TermId, f64>> = Vec::with_capacity(catalog.len());

        for product in catalog {
            let mut tf: HashMap<TermId, f64> = HashMap::new();
            for (field, weight) in [
                (product.title.as_str(), weights.title_weight),
                (product.category.as_str(), weights.category_weight),
                (product.description.as_str(), weights.description_weight),
            ] {
                if weight <= 0.0 {
                    continue;
                }
                for token in text::tokenize(field) {
                    let next_id = vocab.len() as TermId;
                    let id = *vocab.entry(token).or_insert_with(|| {
                        df.push(0);
                        next_id
                    });
                    *tf.entry(id).or_default() += weight;
                }
            }
            for id in tf.keys() {
                df[*id as usize] += 1;
            }
            raw_docs.push(tf);
        }

        let n = catalog.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + f64::from(d))).ln() + 1.0)
            .collect();

        let docs = raw_docs
            .into_iter()
            .map(|tf| {
                let mut vec: Vec<(TermId, f64)> = tf
                    .into_iter()
                    .map(|(id, count)| (id, sublinear(count) * idf[id as usize]))
                    .collect();
                vec.sort_unstable_by_key(|(id, _)| *id);
                normalize(&mut vec);
                vec
            })
            .collect();

        debug!(products = catalog.len(), terms = vocab.len(), "lexical index built");

        Self {
            vocab,
            idf,
            docs,
            ids: catalog.iter().map(|p| p.id.clone()).collect(),
        }
    }

    /// Score every product against `query`. Products sharing no term get 0.0.
    pub fn score(&self, query: &str) -> ScoreMap {
        let query_vec = self.query_vector(query);
        self.docs
            .par_iter()
            .zip(self.ids.par_iter())
            .map(|(doc, id)| {
                let dot: f64 = if query_vec.is_empty() {
                    0.0
                } else {
                    doc.iter()
                        .filter_map(|(term, w)| query_vec.get(term).map(|q| q * w))
                        .sum()
                };
                let score = if dot.is_finite() { dot.clamp(0.0, 1.0) } else { 0.0 };
                (id.clone(), score)
            })
            .collect()
    }

    /// Query terms absent from the catalog vocabulary are ignored.
    fn query_vector(&self, query: &str) -> HashMap<TermId, f64> {
        let mut tf: HashMap<TermId, f64> = HashMap::new();
        for token in text::tokenize(query) {
            if let Some(&id) = self.vocab.get(&token) {
                *tf.entry(id).or_default() += 1.0;
            }
        }
        let mut vec: Vec<(TermId, f64)> = tf
            .into_iter()
            .map(|(id, count)| (id, sublinear(count) * self.idf[id as usize]))
            .collect();
        // The norm must be summed in a fixed order for scores to be bit-identical.
        vec.sort_unstable_by_key(|(id, _)| *id);
        normalize(&mut vec);
        vec.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }
}

/// Score `query` against a catalog with default field weights.
pub fn score(query: &str, catalog: &Catalog) -> ScoreMap {
    LexicalIndex::build(catalog, &LexicalConfig::default()).score(query)
}

/// `1 + ln(tf)` for counts of at least one; fractional weighted counts stay linear.
fn sublinear(tf: f64) -> f64 {
    if tf >= 1.0 {
        1.0 + tf.ln()
    } else {
        tf.max(0.0)
    }
}

fn normalize(vec: &mut [(TermId, f64)]) {
    let norm = vec.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for (_, w) in vec.iter_mut() {
            *w /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisle_core::models::ProductRecord;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ProductRecord::new("1", "Red Shoes").with_category("Footwear"),
            ProductRecord::new("2", "Blue Shoes").with_category("Footwear"),
            ProductRecord::new("3", "Electric Kettle")
                .with_category("Home&Kitchen|Kettles")
                .with_description("Stainless steel, 1.7 litre"),
        ])
        .unwrap()
    }

    #[test]
    fn every_product_gets_a_score() {
        let scores = score("red shoes", &catalog());
        assert_eq!(scores.len(), 3);
        assert_eq!(scores["3"], 0.0);
    }

    #[test]
    fn rarer_term_breaks_the_tie() {
        let scores = score("red shoes", &catalog());
        assert!(scores["1"] > scores["2"]);
        assert!(scores["2"] > 0.0);
    }

    #[test]
    fn identical_text_scores_near_one() {
        let catalog = Catalog::new(vec![ProductRecord::new("1", "kettle")]).unwrap();
        let index = LexicalIndex::build(
            &catalog,
            &LexicalConfig {
                title_weight: 1.0,
                category_weight: 0.0,
                description_weight: 0.0,
            },
        );
        assert!((index.score("kettle")["1"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn category_separators_split_tokens() {
        let scores = score("kitchen", &catalog());
        assert!(scores["3"] > 0.0);
    }

    #[test]
    fn stop_word_query_scores_zero() {
        let scores = score("the and of", &catalog());
        assert!(scores.values().all(|&s| s == 0.0));
    }

    #[test]
    fn unknown_terms_are_ignored() {
        let index = LexicalIndex::build(&catalog(), &LexicalConfig::default());
        assert_eq!(index.score("red zeppelin"), index.score("red"));
    }

    #[test]
    fn empty_catalog_gives_empty_map() {
        let index = LexicalIndex::build(&Catalog::default(), &LexicalConfig::default());
        assert!(index.is_empty());
        assert!(index.score("anything").is_empty());
    }

    #[test]
    fn repeated_multi_term_queries_are_bit_identical() {
        let words = [
            "red", "blue", "green", "shoes", "kettle", "cable", "lamp", "desk", "steel",
            "cotton", "wireless", "charger",
        ];
        let products = (0..12)
            .map(|i| {
                let title = format!("{} {} {}", words[i], words[(i + 3) % 12], words[(i + 7) % 12]);
                ProductRecord::new(i.to_string(), title).with_description(words[(i + 5) % 12])
            })
            .collect();
        let catalog = Catalog::new(products).unwrap();
        let index = LexicalIndex::build(&catalog, &LexicalConfig::default());
        let query = words.join(" ");

        let first = index.score(&query);
        for _ in 0..200 {
            let again = index.score(&query);
            for (id, score) in &first {
                assert_eq!(score.to_bits(), again[id].to_bits(), "product {id}");
            }
        }
    }

    #[test]
    fn sublinear_is_continuous_at_one() {
        assert_eq!(sublinear(1.0), 1.0);
        assert_eq!(sublinear(0.5), 0.5);
        assert!((sublinear(std::f64::consts::E) - 2.0).abs() < 1e-12);
    }
}
