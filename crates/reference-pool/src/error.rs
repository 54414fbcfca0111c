//! Error types for pool operations.

use reference_store::StoreError;
use thiserror::Error;

/// Errors that can occur when taking an entry from a pool.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The filter matched no rows, even after a refill.
    ///
    /// Recoverable: the caller can relax the filter or skip the record.
    #[error("No {category} rows match {filter}")]
    EmptyPool {
        category: &'static str,
        filter: String,
    },

    /// The store failed. Fatal for the generation run.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PoolError {
    /// Whether this is the recoverable [`PoolError::EmptyPool`] case.
    pub fn is_empty_pool(&self) -> bool {
        matches!(self, PoolError::EmptyPool { .. })
    }
}
