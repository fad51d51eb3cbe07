use aisle_core::traits::IEmbeddingProvider;
use aisle_embeddings::providers::HashedProvider;
use aisle_embeddings::similarity::{cosine, unit_cosine};
use proptest::prelude::*;

fn arb_vec(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, len)
}

proptest! {
    #[test]
    fn unit_cosine_stays_in_range((a, b) in (1usize..16).prop_flat_map(|n| (arb_vec(n), arb_vec(n)))) {
        if let Some(s) = unit_cosine(&a, &b) {
            prop_assert!((0.0..=1.0).contains(&s));
        }
        if let Some(c) = cosine(&a, &b) {
            prop_assert!((-1.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn mismatched_lengths_have_no_similarity(a in arb_vec(3), b in arb_vec(4)) {
        prop_assert_eq!(unit_cosine(&a, &b), None);
    }

    #[test]
    fn hashed_vectors_are_deterministic(text in "[a-z ]{0,60}", dims in 1usize..64) {
        let provider = HashedProvider::new(dims);
        let first = provider.embed(&text).unwrap();
        let second = provider.embed(&text).unwrap();
        prop_assert_eq!(first.len(), dims);
        let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn hashed_vectors_are_unit_or_zero(text in "[a-z ]{0,60}") {
        let v = HashedProvider::new(32).embed(&text).unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4, "norm {}", norm);
    }
}
