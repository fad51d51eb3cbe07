//! Catalog sources: CSV, JSON array, and JSON lines files.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use aisle_core::config::CatalogConfig;
use aisle_core::errors::LoadError;
use aisle_core::models::Catalog;
use tracing::{debug, info};

use crate::clean::{clean_with_report, CleanOptions, CleaningReport};
use crate::raw::RawProduct;

/// On-disk catalog formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    /// A single JSON array of product objects.
    Json,
    /// One JSON object per line.
    JsonLines,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Loads and cleans a catalog from a file.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    options: CleanOptions,
}

impl CatalogLoader {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(CleanOptions {
            title_fallback_chars: config.title_fallback_chars,
        })
    }

    /// Load a catalog from `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
        self.load_with_report(path).map(|(catalog, _)| catalog)
    }

    /// Load a catalog and return the cleaning report alongside it.
    pub fn load_with_report(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(Catalog, CleaningReport), LoadError> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
            path: path.display().to_string(),
        })?;

        let raw = read_raw(path, format)?;
        debug!(path = %path.display(), ?format, rows = raw.len(), "catalog source read");

        let (catalog, report) = clean_with_report(raw, &self.options)?;
        info!(
            path = %path.display(),
            products = catalog.len(),
            with_embeddings = catalog.embedded_count(),
            "catalog loaded"
        );
        Ok((catalog, report))
    }
}

/// Load a catalog from `path` with default cleaning options.
pub fn load(path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
    CatalogLoader::default().load(path)
}

/// Read raw rows from a source without cleaning them.
pub fn read_raw(path: &Path, format: SourceFormat) -> Result<Vec<RawProduct>, LoadError> {
    let file = File::open(path).map_err(|e| unreadable(path, e))?;
    match format {
        SourceFormat::Csv => read_csv(path, file),
        SourceFormat::Json => read_json(path, file),
        SourceFormat::JsonLines => read_json_lines(path, file),
    }
}

fn read_csv(path: &Path, file: File) -> Result<Vec<RawProduct>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    // Records are read as plain string maps so that ids like "00123" keep
    // their leading zeros; column aliases are resolved by RawProduct.
    for (idx, record) in reader.deserialize::<HashMap<String, String>>().enumerate() {
        let record = record.map_err(|e| malformed(path, idx as u64 + 1, e))?;
        let object: serde_json::Map<String, serde_json::Value> = record
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        let raw: RawProduct = serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| malformed(path, idx as u64 + 1, e))?;
        rows.push(raw);
    }
    Ok(rows)
}

fn read_json(path: &Path, file: File) -> Result<Vec<RawProduct>, LoadError> {
    serde_json::from_reader(BufReader::new(file)).map_err(|e| malformed(path, e.line() as u64, e))
}

fn read_json_lines(path: &Path, file: File) -> Result<Vec<RawProduct>, LoadError> {
    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| unreadable(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawProduct =
            serde_json::from_str(&line).map_err(|e| malformed(path, idx as u64 + 1, e))?;
        rows.push(raw);
    }
    Ok(rows)
}

fn unreadable(path: &Path, e: impl std::fmt::Display) -> LoadError {
    LoadError::SourceUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn malformed(path: &Path, record: u64, e: impl std::fmt::Display) -> LoadError {
    LoadError::Malformed {
        path: path.display().to_string(),
        record,
        reason: e.to_string(),
    }
}
