/// Catalog loading errors. Fatal at engine initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("catalog source {path} is unreadable: {reason}")]
    SourceUnreadable { path: String, reason: String },

    #[error("catalog source {path} is malformed at record {record}: {reason}")]
    Malformed {
        path: String,
        record: u64,
        reason: String,
    },

    #[error("unsupported catalog format for {path} (expected .csv or .json)")]
    UnsupportedFormat { path: String },

    #[error("catalog is empty after cleaning ({rows_read} rows read)")]
    EmptyCatalog { rows_read: usize },

    #[error("duplicate product id in catalog: {id}")]
    DuplicateId { id: String },
}
