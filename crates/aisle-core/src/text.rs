//! Text normalization shared by the catalog loader and the retrievers.

use crate::constants::MIN_TOKEN_CHARS;

/// Words that carry no product signal.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "its", "of",
    "on", "or", "that", "the", "this", "to", "with",
];

/// Trim, collapse internal whitespace, and lowercase.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim and collapse internal whitespace, preserving case. Used for display fields.
pub fn clean_display(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split into lowercase alphanumeric tokens, dropping short tokens and stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .filter(|s| !is_stop_word(s))
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_sorted() {
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, STOP_WORDS);
    }

    #[test]
    fn tokenize_splits_category_paths() {
        let tokens = tokenize("Computers&Accessories|Cables|USBCables");
        assert_eq!(tokens, vec!["computers", "accessories", "cables", "usbcables"]);
    }

    #[test]
    fn tokenize_drops_stop_words_and_short_tokens() {
        assert_eq!(tokenize("The shoes for a X run"), vec!["shoes", "run"]);
    }

    #[test]
    fn fold_collapses_whitespace() {
        assert_eq!(fold("  Red\tSHOES \n"), "red shoes");
    }
}
