//! Error types for data operations
//!
//! Provides unified error handling for loading uploads and dispatching
//! charts over the loaded table.

use thiserror::Error;

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error (CSV reading)
    #[error("CSV parse error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Excel workbook error from calamine
    #[error("Excel parse error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// Upload is too large
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// Too many rows for loading
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    /// File is empty
    #[error("Empty file")]
    EmptyFile,

    /// No columns found in data
    #[error("No columns found")]
    NoColumns,

    /// Upload is neither CSV nor XLSX
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Selected column does not exist in the table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Secondary column is not one of the offered choices
    #[error("Invalid selection '{column}' (expected one of {allowed:?})")]
    InvalidSelection { column: String, allowed: Vec<String> },

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
