//! Rows returned by the reference store.

use crate::StoreError;
use std::collections::BTreeMap;

/// A single row returned by the store, keyed by column name.
///
/// NULL columns are left out, so `get` returns `None` for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: BTreeMap<String, String>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, builder style.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Value of a column, or [`StoreError::MissingColumn`].
    pub fn require(&self, column: &str) -> Result<&str, StoreError> {
        self.get(column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))
    }

    /// Column names present in this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

/// Decode a typed record from a store row.
pub trait FromRow: Sized {
    /// Build the record, failing if a required column is absent or invalid.
    fn from_row(row: &Row) -> Result<Self, StoreError>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(row.clone())
    }
}
