//! Error handling for the exposure profiler.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while profiling a population
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required columns are absent from an input table
    #[error("{table} table is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Which input table was checked
        table: String,
        /// Every required column that was not found
        missing: Vec<String>,
    },

    /// A column exists but cannot be read as the expected type
    #[error("Column '{column}' cannot be read as {expected}")]
    InvalidDataType {
        /// Column name
        column: String,
        /// Human-readable expected type
        expected: String,
    },

    /// A participant row carries a null or unreadable date
    #[error("Malformed {column} for participant row {row}")]
    MalformedDate {
        /// Date column name
        column: String,
        /// Row index in the population table
        row: usize,
    },

    /// Window arithmetic left the representable date range
    #[error("Invalid exposure window: {0}")]
    InvalidWindow(String),

    /// Configuration rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The same person appears twice in the population table
    #[error("Duplicate person_id '{0}' in population table")]
    DuplicatePersonId(String),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Config file parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Row serialization into Arrow failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),

    /// The worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Build a missing-columns error for a named table
    pub fn missing_columns<S: Into<String>>(table: S, missing: Vec<String>) -> Self {
        Self::MissingColumns {
            table: table.into(),
            missing,
        }
    }
}

/// Result type for profiler operations
pub type Result<T> = std::result::Result<T, Error>;
