use aisle_catalog::parse::{parse_count, parse_number, parse_price, parse_rating};
use aisle_catalog::{clean_with_report, CleanOptions, RawProduct};
use proptest::prelude::*;

fn arb_raw() -> impl Strategy<Value = RawProduct> {
    (
        prop::option::of("[a-c]{0,2}"),
        prop::option::of("[a-zA-Z ]{0,12}"),
        prop::option::of("[₹$0-9,.\\-|a-z%]{0,8}"),
        prop::option::of("[0-9.|NaN-]{0,5}"),
    )
        .prop_map(|(id, title, price, rating)| RawProduct {
            id,
            title,
            price,
            rating,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn parsed_numbers_are_finite(value in "\\PC{0,16}") {
        if let Some(v) = parse_number(&value) {
            prop_assert!(v.is_finite());
        }
        if let Some(v) = parse_price(&value) {
            prop_assert!(v >= 0.0);
        }
        if let Some(v) = parse_rating(&value, 5.0) {
            prop_assert!((0.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn formatted_counts_roundtrip(n in 0u64..10_000_000) {
        let mut formatted = String::new();
        let digits = n.to_string();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                formatted.push(',');
            }
            formatted.push(c);
        }
        prop_assert_eq!(parse_count(&formatted), Some(n));
    }

    #[test]
    fn cleaned_catalog_upholds_invariants(rows in prop::collection::vec(arb_raw(), 0..24)) {
        match clean_with_report(rows.clone(), &CleanOptions::default()) {
            Ok((catalog, report)) => {
                prop_assert_eq!(report.rows_read, rows.len());
                prop_assert_eq!(catalog.len(), report.rows_kept);
                prop_assert_eq!(
                    report.rows_read,
                    report.rows_kept
                        + report.dropped_missing_id
                        + report.dropped_duplicate_id
                        + report.dropped_missing_text
                );
                let mut ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
                let total = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), total);
                for p in catalog.iter() {
                    prop_assert!(!p.id.trim().is_empty());
                    prop_assert!(!p.title.is_empty());
                    prop_assert!(p.price.map_or(true, f64::is_finite));
                    prop_assert!(p.rating.map_or(true, |r| (0.0..=5.0).contains(&r)));
                }
            }
            Err(_) => {
                // Only an empty result is an error.
                let survivors = rows.iter().filter(|r| {
                    r.id.as_deref().is_some_and(|s| !s.trim().is_empty())
                        && r.title.as_deref().is_some_and(|s| !s.trim().is_empty())
                }).count();
                prop_assert_eq!(survivors, 0);
            }
        }
    }
}
