//! Store abstraction used by the pool cache.

use crate::{QueryRequest, Row, StoreError};

/// Read-only source of reference rows.
///
/// Implementations execute a rendered [`QueryRequest`] and return every
/// matching row. The cache never writes through this trait.
pub trait ReferenceStore {
    /// Execute the query and return all rows.
    fn query_many(&self, request: &QueryRequest) -> Result<Vec<Row>, StoreError>;

    /// Execute the query and return the first row, if any.
    ///
    /// Callers wanting a single random row should build the request with a
    /// limit of 1; this method does not rewrite the query.
    fn query_one(&self, request: &QueryRequest) -> Result<Option<Row>, StoreError> {
        Ok(self.query_many(request)?.into_iter().next())
    }
}

impl<S: ReferenceStore + ?Sized> ReferenceStore for &S {
    fn query_many(&self, request: &QueryRequest) -> Result<Vec<Row>, StoreError> {
        (**self).query_many(request)
    }

    fn query_one(&self, request: &QueryRequest) -> Result<Option<Row>, StoreError> {
        (**self).query_one(request)
    }
}
