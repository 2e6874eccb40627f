//! Error types for tabkit-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabkit-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A designated field is absent from a table header or record
    #[error("column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    /// Separator or quote character cannot be used as a single-byte delimiter
    #[error("invalid {field} character {value:?}: must be a single ASCII character")]
    InvalidDialect { field: &'static str, value: char },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_column(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Error::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }
}
