//! Error types for the recon library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reconciliation operations.
#[derive(Debug, Error)]
pub enum ReconError {
    /// The primary-key column is absent from one or both datasets.
    #[error("Primary key '{key}' missing in: {}", .missing_in.join(", "))]
    MissingKeyColumn {
        key: String,
        /// Names of the datasets whose schema lacks the key.
        missing_in: Vec<String>,
    },

    /// A source could not be parsed into a dataset.
    #[error("Malformed input '{source_name}': {message}")]
    MalformedInput {
        source_name: String,
        message: String,
    },

    /// Run configuration that cannot produce a valid output layout.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing an XLSX workbook.
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl ReconError {
    pub(crate) fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Whether the caller can fix this by changing the request
    /// (as opposed to a failure while reading or writing data).
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::MissingKeyColumn { .. })
    }
}

/// Result type alias for recon operations.
pub type Result<T> = std::result::Result<T, ReconError>;
