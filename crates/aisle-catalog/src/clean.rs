//! Validation and normalization of raw rows into a `Catalog`.
//!
//! Rules:
//! - rows with a blank id are dropped; for duplicate ids the first row wins
//! - a blank title is repaired from the description, else the row is dropped
//! - prices, ratings, and percentages become finite `f64` or `None`
//! - embeddings whose dimension differs from the first valid one are dropped

use std::collections::HashSet;

use aisle_core::config::defaults::DEFAULT_TITLE_FALLBACK_CHARS;
use aisle_core::constants::MAX_RATING;
use aisle_core::errors::LoadError;
use aisle_core::models::{Catalog, ProductRecord};
use aisle_core::text;
use serde::Serialize;
use tracing::{debug, info};

use crate::parse;
use crate::raw::RawProduct;

/// Knobs for the cleaning pass.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Max description chars used when repairing a blank title.
    pub title_fallback_chars: usize,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            title_fallback_chars: DEFAULT_TITLE_FALLBACK_CHARS,
        }
    }
}

/// Counters describing what the cleaning pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_missing_id: usize,
    pub dropped_duplicate_id: usize,
    pub dropped_missing_text: usize,
    pub repaired_titles: usize,
    pub invalid_prices: usize,
    pub invalid_ratings: usize,
    pub invalid_embeddings: usize,
}

/// Clean raw rows into a catalog with default options.
pub fn clean(raw: Vec<RawProduct>) -> Result<Catalog, LoadError> {
    clean_with_report(raw, &CleanOptions::default()).map(|(catalog, _)| catalog)
}

/// Clean raw rows, returning the catalog together with a report.
///
/// # Errors
/// `LoadError::EmptyCatalog` when no row survives cleaning.
pub fn clean_with_report(
    raw: Vec<RawProduct>,
    options: &CleanOptions,
) -> Result<(Catalog, CleaningReport), LoadError> {
    let mut report = CleaningReport {
        rows_read: raw.len(),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut embedding_dims: Option<usize> = None;
    let mut products = Vec::with_capacity(raw.len());

    for row in raw {
        let Some(id) = parse::non_blank(row.id.as_deref()).map(str::to_string) else {
            report.dropped_missing_id += 1;
            continue;
        };
        if seen.contains(&id) {
            debug!(%id, "dropping duplicate product id");
            report.dropped_duplicate_id += 1;
            continue;
        }

        let description = parse::non_blank(row.description.as_deref())
            .map(text::clean_display)
            .unwrap_or_default();
        let title = match parse::non_blank(row.title.as_deref()) {
            Some(title) => text::clean_display(title),
            None if !description.is_empty() => {
                report.repaired_titles += 1;
                parse::truncate_chars(&description, options.title_fallback_chars)
            }
            None => {
                report.dropped_missing_text += 1;
                continue;
            }
        };

        let mut product = ProductRecord::new(id.clone(), title).with_description(description);
        product.category = parse::non_blank(row.category.as_deref())
            .map(text::clean_display)
            .unwrap_or_default();

        product.price = parse_field(row.price.as_deref(), parse::parse_price, &mut report.invalid_prices);
        product.actual_price = parse_field(
            row.actual_price.as_deref(),
            parse::parse_price,
            &mut report.invalid_prices,
        );
        product.discount_percentage =
            parse::non_blank(row.discount_percentage.as_deref()).and_then(parse::parse_percentage);
        product.rating = parse_field(
            row.rating.as_deref(),
            |v| parse::parse_rating(v, MAX_RATING),
            &mut report.invalid_ratings,
        );
        product.rating_count =
            parse::non_blank(row.rating_count.as_deref()).and_then(parse::parse_count);
        product.image_url = parse::non_blank(row.image_url.as_deref()).map(str::to_string);
        product.product_url = parse::non_blank(row.product_url.as_deref()).map(str::to_string);

        if let Some(raw_embedding) = parse::non_blank(row.embedding.as_deref()) {
            product.embedding = match parse::parse_embedding(raw_embedding) {
                Some(vec) if embedding_dims.map_or(true, |d| d == vec.len()) => {
                    embedding_dims = Some(vec.len());
                    Some(vec)
                }
                _ => {
                    report.invalid_embeddings += 1;
                    None
                }
            };
        }

        seen.insert(id);
        products.push(product);
    }

    report.rows_kept = products.len();
    if products.is_empty() {
        return Err(LoadError::EmptyCatalog {
            rows_read: report.rows_read,
        });
    }

    let catalog = Catalog::new(products)?;

    info!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        dropped_missing_id = report.dropped_missing_id,
        dropped_duplicate_id = report.dropped_duplicate_id,
        dropped_missing_text = report.dropped_missing_text,
        repaired_titles = report.repaired_titles,
        invalid_prices = report.invalid_prices,
        invalid_ratings = report.invalid_ratings,
        invalid_embeddings = report.invalid_embeddings,
        "catalog cleaned"
    );

    Ok((catalog, report))
}

/// Parse a non-blank field, counting values that are present but unusable.
fn parse_field<T>(
    value: Option<&str>,
    parser: impl Fn(&str) -> Option<T>,
    invalid: &mut usize,
) -> Option<T> {
    let value = parse::non_blank(value)?;
    let parsed = parser(value);
    if parsed.is_none() {
        *invalid += 1;
    }
    parsed
}
