//! # aisle-catalog
//!
//! Reads raw product exports (CSV or JSON), validates and normalizes them,
//! and produces the immutable `Catalog` served by the recommender.
//!
//! Loading happens once at process start. Any failure here is fatal to
//! engine initialization: no partial catalog is ever served.

pub mod clean;
pub mod loader;
pub mod parse;
pub mod raw;

pub use clean::{clean, clean_with_report, CleanOptions, CleaningReport};
pub use loader::{load, CatalogLoader, SourceFormat};
pub use raw::RawProduct;
