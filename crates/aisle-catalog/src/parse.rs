//! Field-level parsers for messy catalog values.
//!
//! Every parser returns `None` rather than a non-finite or out-of-range value.

use std::sync::LazyLock;

use regex::Regex;

/// First numeric token: optional minus, digits with `,` grouping, decimal parts.
/// Repeated decimal parts are matched so that `"1.2.3"` can be rejected whole.
static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d[\d,]*(?:\.\d+)*").unwrap());

/// Parse a loosely formatted number: `"₹1,099"`, `"64%"`, `"Rs. 499"`,
/// `"4.2 out of 5 stars"`. Only the first numeric token is used.
pub fn parse_number(value: &str) -> Option<f64> {
    let token = NUMBER_TOKEN.find(value.trim())?.as_str();
    if token.matches('.').count() > 1 {
        return None;
    }
    token.replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Prices must be non-negative.
pub fn parse_price(value: &str) -> Option<f64> {
    parse_number(value).filter(|v| *v >= 0.0)
}

/// Ratings must fall within `[0, max]`.
pub fn parse_rating(value: &str, max: f64) -> Option<f64> {
    parse_number(value).filter(|v| (0.0..=max).contains(v))
}

/// Percentages must fall within `[0, 100]`.
pub fn parse_percentage(value: &str) -> Option<f64> {
    parse_number(value).filter(|v| (0.0..=100.0).contains(v))
}

/// Counts like `"24,269"`. Fractions and negatives are rejected.
pub fn parse_count(value: &str) -> Option<u64> {
    let digits: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    digits.parse::<u64>().ok()
}

/// Parse a vector from a JSON array or comma/whitespace separated floats.
pub fn parse_embedding(value: &str) -> Option<Vec<f32>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed: Option<Vec<f32>> = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<f32>>(trimmed).ok()
    } else {
        trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f32>().ok())
            .collect()
    };

    parsed.filter(|v| !v.is_empty() && v.iter().all(|x| x.is_finite()))
}

/// Treat blank strings as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Truncate to at most `max_chars` characters on a char boundary, then trim.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupee_prices_with_separators() {
        assert_eq!(parse_price("₹1,099"), Some(1099.0));
        assert_eq!(parse_price("₹399.50"), Some(399.5));
        assert_eq!(parse_price("$12"), Some(12.0));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_number("|"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn only_first_numeric_token_is_used() {
        assert_eq!(parse_price("Rs. 499"), Some(499.0));
        assert_eq!(parse_rating("4.2 out of 5 stars", 5.0), Some(4.2));
        assert_eq!(parse_price("₹1,099 - ₹1,299"), Some(1099.0));
        assert_eq!(parse_percentage("-64% off"), None);
    }

    #[test]
    fn negative_price_rejected() {
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_number("-5"), Some(-5.0));
    }

    #[test]
    fn rating_range() {
        assert_eq!(parse_rating("4.2", 5.0), Some(4.2));
        assert_eq!(parse_rating("5", 5.0), Some(5.0));
        assert_eq!(parse_rating("7.5", 5.0), None);
    }

    #[test]
    fn percentage_with_sign() {
        assert_eq!(parse_percentage("64%"), Some(64.0));
        assert_eq!(parse_percentage("140%"), None);
    }

    #[test]
    fn counts_with_commas() {
        assert_eq!(parse_count("24,269"), Some(24_269));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn embeddings_in_both_formats() {
        assert_eq!(parse_embedding("[0.5, -0.25]"), Some(vec![0.5, -0.25]));
        assert_eq!(parse_embedding("0.5 -0.25 1"), Some(vec![0.5, -0.25, 1.0]));
        assert_eq!(parse_embedding("0.5,x"), None);
        assert_eq!(parse_embedding("[]"), None);
        assert_eq!(parse_embedding("NaN 1.0"), None);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("câble usb", 5), "câble");
        assert_eq!(truncate_chars("ab ", 80), "ab");
    }
}
