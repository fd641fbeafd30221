//! Error handling for the cohort engine.
//!
//! Pure cohort computations never fail; errors only arise at the edges, when
//! report files are read, configuration is loaded or results are exported.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the cohort engine
#[derive(Debug, thiserror::Error)]
pub enum CohortError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// IO error with the file and purpose that triggered it
    #[error("IO error on {path}: {context}")]
    IoAt {
        /// File or directory involved
        path: PathBuf,
        /// What the file was needed for
        context: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// Error decoding or encoding Arrow data (CSV reader/writer, casts)
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
    /// Error converting report rows to record batches
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),
    /// Error parsing a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A report file lacks columns its table requires
    #[error("{table} data requires columns {missing:?}; the file had {found:?}")]
    MissingColumns {
        /// Table the file was loaded as
        table: String,
        /// Required columns that were not present
        missing: Vec<String>,
        /// Columns present in the file header
        found: Vec<String>,
    },
    /// A report file has an extension we cannot read or write
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),
    /// A file or directory was expected but not found
    #[error("Not found: {0}")]
    NotFound(PathBuf),
    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CohortError {
    /// Build a configuration error from any displayable message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach a path and purpose to an IO error
    pub fn io_at(path: impl Into<PathBuf>, context: impl Into<String>, source: io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            context: context.into(),
            source,
        }
    }
}

/// Result type for cohort engine operations
pub type Result<T> = std::result::Result<T, CohortError>;
