//! Error types for cross-dataset DE comparison

use thiserror::Error;

/// Main error type for de_meta operations
#[derive(Error, Debug)]
pub enum MetaError {
    #[error("Column '{column}' not found in {file}")]
    MissingColumn { column: String, file: String },

    #[error("Empty or missing worksheet in {file}")]
    EmptySheet { file: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("Invalid matrix: {reason}")]
    InvalidMatrix { reason: String },

    #[error("Plot rendering failed: {0}")]
    Plot(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for de_meta operations
pub type Result<T> = std::result::Result<T, MetaError>;

impl MetaError {
    /// Wrap a plotters backend error (generic over the backend type)
    pub fn plot<E: std::fmt::Display>(err: E) -> Self {
        MetaError::Plot(err.to_string())
    }
}
