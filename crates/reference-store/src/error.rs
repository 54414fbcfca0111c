//! Error types for reference store operations.

use thiserror::Error;

/// Errors that can occur while reading from the reference store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The dataset could not be opened or a query failed at the SQLite level.
    #[error("Reference store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    /// A row was returned without a column the caller needs.
    #[error("Column '{0}' missing from reference row")]
    MissingColumn(String),

    /// A column held a value outside its expected domain.
    #[error("Invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },
}
