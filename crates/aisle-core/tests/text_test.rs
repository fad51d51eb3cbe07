use aisle_core::text::{fold, tokenize};
use proptest::prelude::*;

#[test]
fn tokenize_handles_unicode_and_currency() {
    assert_eq!(tokenize("₹399 Câble USB"), vec!["399", "câble", "usb"]);
}

proptest! {
    #[test]
    fn tokens_are_lowercase_and_long_enough(text in "[a-zA-Z0-9 ,.|&-]{0,64}") {
        for token in tokenize(&text) {
            prop_assert!(token.chars().count() >= 2);
            prop_assert_eq!(token.to_lowercase(), token.clone());
            prop_assert!(token.chars().all(char::is_alphanumeric));
        }
    }

    #[test]
    fn fold_is_idempotent(text in "[a-zA-Z0-9 \t\n]{0,64}") {
        let once = fold(&text);
        prop_assert_eq!(fold(&once), once);
    }

    #[test]
    fn tokenize_is_invariant_under_fold(text in "[a-zA-Z ]{0,64}") {
        prop_assert_eq!(tokenize(&text), tokenize(&fold(&text)));
    }
}
