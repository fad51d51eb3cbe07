//! Golden ranking fixtures.
//!
//! Each file under `test-fixtures/golden/` names a catalog and a list of
//! cases. Cases run lexical-only (no embedding provider, no LLM) so their
//! expected order is fully determined by the catalog text.

use std::collections::BTreeSet;
use std::path::Path;

use aisle_core::AisleConfig;
use aisle_retrieval::RecommendationEngine;
use serde_json::Value;
use test_fixtures::{fixture_path, list_fixtures};

fn engine_for(catalog: &str, rating_weight: f64) -> RecommendationEngine {
    let mut config = AisleConfig::default();
    config.catalog.path = fixture_path(catalog).display().to_string();
    config.fusion.rating_weight = rating_weight;
    RecommendationEngine::from_config(&config)
        .unwrap_or_else(|e| panic!("engine for {catalog}: {e}"))
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

fn run_golden(path: &Path) -> usize {
    let content = std::fs::read_to_string(path).unwrap();
    let fixture: Value = serde_json::from_str(&content).unwrap();
    let catalog = fixture["catalog"].as_str().unwrap();
    let cases = fixture["cases"].as_array().unwrap();

    for case in cases {
        let name = case["name"].as_str().unwrap_or("unnamed");
        let query = case["query"].as_str().unwrap();
        let k = case["k"].as_i64().unwrap();
        let rating_weight = case["rating_weight"].as_f64().unwrap_or(0.0);

        let engine = engine_for(catalog, rating_weight);
        let result = engine
            .get_recommendations(query, k, false)
            .unwrap_or_else(|e| panic!("{}::{name}: {e}", path.display()));
        let got: Vec<String> = result.ids().into_iter().map(String::from).collect();

        if let Some(expected) = case.get("expected_ids") {
            assert_eq!(got, strings(expected), "{}::{name}", path.display());
        }
        if let Some(expected) = case.get("expected_set") {
            let got: BTreeSet<String> = got.into_iter().collect();
            let expected: BTreeSet<String> = strings(expected).into_iter().collect();
            assert_eq!(got, expected, "{}::{name}", path.display());
        }
        assert!(result.len() <= k as usize, "{}::{name}", path.display());
        for (i, item) in result.items.iter().enumerate() {
            assert_eq!(item.rank, i + 1, "{}::{name}", path.display());
        }
    }
    cases.len()
}

#[test]
fn golden_rankings() {
    let files = list_fixtures("golden", "json");
    assert!(!files.is_empty(), "no golden fixtures found");
    let total: usize = files.iter().map(|f| run_golden(f)).sum();
    assert!(total >= 10, "expected at least 10 golden cases, ran {total}");
}
