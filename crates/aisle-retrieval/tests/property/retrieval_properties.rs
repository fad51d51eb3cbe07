use std::collections::BTreeSet;
use std::sync::Arc;

use aisle_core::config::FusionConfig;
use aisle_core::errors::RerankError;
use aisle_core::models::{Catalog, ProductRecord, ScoreMap, ScoredCandidate};
use aisle_core::traits::ILlmClient;
use aisle_core::{AisleConfig, CancellationToken};
use aisle_retrieval::ranking::fusion::compare;
use aisle_retrieval::ranking::reranker::merge_order;
use aisle_retrieval::{HybridFusion, LlmReranker, RecommendationEngine};
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "red", "blue", "shoes", "cable", "usb", "kettle", "steel", "smart", "tv", "lamp",
];

fn arb_scores(max: usize) -> impl Strategy<Value = ScoreMap> {
    prop::collection::hash_map("[a-h]", -0.5f64..1.5, 0..max)
}

fn arb_title() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..4).prop_map(|w| w.join(" "))
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec((arb_title(), prop::option::of(0.0f64..=5.0)), 1..12).prop_map(|rows| {
        let products = rows
            .into_iter()
            .enumerate()
            .map(|(i, (title, rating))| {
                let mut p = ProductRecord::new(format!("p{i:02}"), title);
                p.rating = rating;
                p
            })
            .collect();
        Catalog::new(products).unwrap()
    })
}

fn candidates(n: usize) -> Vec<ScoredCandidate> {
    (0..n)
        .map(|i| ScoredCandidate {
            product_id: format!("p{i:02}"),
            lexical_score: 0.5,
            embedding_score: None,
            fused_score: 1.0 - i as f64 / 100.0,
            source: aisle_core::models::SignalSource::Lexical,
        })
        .collect()
}

struct EchoLlm(String);

impl ILlmClient for EchoLlm {
    fn complete(&self, _system: &str, _prompt: &str) -> Result<String, RerankError> {
        Ok(self.0.clone())
    }
    fn name(&self) -> &str {
        "echo"
    }
    fn is_configured(&self) -> bool {
        true
    }
}

fn offline_config() -> AisleConfig {
    let mut config = AisleConfig::default();
    config.rerank.api_key = None;
    config.rerank.api_key_env = "AISLE_TEST_UNSET_GROQ_KEY".to_string();
    config
}

proptest! {
    #[test]
    fn fused_scores_bounded_and_sorted(lex in arb_scores(8), emb in arb_scores(8)) {
        let fusion = HybridFusion::new(FusionConfig::default()).unwrap();
        let out = fusion.fuse(&lex, Some(&emb));
        for c in &out {
            prop_assert!(c.fused_score.is_finite());
            prop_assert!((0.0..=1.0).contains(&c.fused_score));
        }
        for pair in out.windows(2) {
            prop_assert_ne!(compare(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
        }
        let ids: BTreeSet<&str> = out.iter().map(|c| c.product_id.as_str()).collect();
        prop_assert_eq!(ids.len(), out.len());
    }

    #[test]
    fn fusion_is_deterministic(lex in arb_scores(8), emb in arb_scores(8)) {
        let fusion = HybridFusion::new(FusionConfig::default()).unwrap();
        prop_assert_eq!(fusion.fuse(&lex, Some(&emb)), fusion.fuse(&lex, Some(&emb)));
    }

    #[test]
    fn only_positive_candidates_survive(lex in arb_scores(8), emb in arb_scores(8)) {
        let weights = FusionConfig::default();
        let out = HybridFusion::new(weights.clone()).unwrap().fuse(&lex, Some(&emb));
        for c in &out {
            let lex_hit = c.lexical_score > weights.min_relevance;
            let emb_hit = c.embedding_score.is_some_and(|e| e > weights.semantic_floor);
            prop_assert!(lex_hit || emb_hit);
        }
    }

    #[test]
    fn merge_order_is_a_permutation(
        n in 1usize..10,
        reply in prop::collection::vec("p0[0-9]|zz", 0..15),
    ) {
        let cands = candidates(n);
        let head: Vec<&str> = cands.iter().map(|c| c.product_id.as_str()).collect();
        match merge_order(&head, &reply) {
            Ok(order) => {
                let mut sorted = order.clone();
                sorted.sort_unstable();
                prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());
            }
            Err(_) => prop_assert!(reply.iter().all(|id| !head.contains(&id.as_str()))),
        }
    }

    #[test]
    fn rerank_never_invents_or_drops_ids(
        n in 0usize..15,
        top_n in 1usize..12,
        reply in "\\[?(\"p0[0-9]\", ?){0,6}\\]?[a-z ]{0,5}",
    ) {
        let cands = candidates(n);
        let catalog = Catalog::new(
            cands.iter().map(|c| ProductRecord::new(c.product_id.clone(), "x")).collect(),
        ).unwrap();
        let reranker = LlmReranker::new(Some(Arc::new(EchoLlm(reply))), top_n);
        let out = reranker
            .rerank("q", cands.clone(), &catalog, true, &CancellationToken::new())
            .unwrap();
        let before: BTreeSet<String> = cands.iter().map(|c| c.product_id.clone()).collect();
        let after: BTreeSet<String> = out.candidates.iter().map(|c| c.product_id.clone()).collect();
        prop_assert_eq!(out.candidates.len(), cands.len());
        prop_assert_eq!(before, after);
        // Everything past the head keeps its fused position.
        let head = n.min(top_n);
        prop_assert_eq!(&out.candidates[head..], &cands[head..]);
    }

    #[test]
    fn engine_results_respect_k(catalog in arb_catalog(), query in arb_title(), k in 0i64..15) {
        let engine = RecommendationEngine::builder(offline_config())
            .catalog(catalog)
            .build()
            .unwrap();
        let result = engine.get_recommendations(&query, k, false).unwrap();
        prop_assert!(result.len() <= k as usize);
        for (i, item) in result.items.iter().enumerate() {
            prop_assert_eq!(item.rank, i + 1);
            prop_assert!(item.score > 0.0 && item.score <= 1.0);
        }
        let again = engine.get_recommendations(&query, k, false).unwrap();
        prop_assert_eq!(result.items, again.items);
    }

    #[test]
    fn missing_llm_credential_matches_plain_ranking(catalog in arb_catalog(), query in arb_title()) {
        let engine = RecommendationEngine::builder(offline_config())
            .catalog(catalog)
            .build()
            .unwrap();
        let plain = engine.get_recommendations(&query, 10, false).unwrap();
        let fallback = engine.get_recommendations(&query, 10, true).unwrap();
        prop_assert_eq!(plain.items, fallback.items);
    }
}
