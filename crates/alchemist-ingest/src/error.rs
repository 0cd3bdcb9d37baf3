//! Error types for data ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading rows.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is neither `.csv` nor `.json`.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse CSV {source_id}: {source}")]
    CsvParse {
        source_id: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse JSON {source_id}: {source}")]
    JsonParse {
        source_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON input was valid but not an array of objects.
    #[error("unexpected JSON shape in {source_id}: {reason}")]
    JsonShape { source_id: String, reason: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
