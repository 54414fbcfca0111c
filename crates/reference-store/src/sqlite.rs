//! SQLite-backed reference store.

use crate::{QueryRequest, ReferenceStore, Row, StoreError};
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info, warn};

/// SQL script for the small dataset that ships with the crate.
pub const BUNDLED_DATASET: &str = include_str!("../resources/reference_data.sql");

/// Reference store over a single SQLite connection.
///
/// The connection is owned by the store: dropping the store releases it,
/// and [`SqliteStore::close`] releases it while reporting close errors.
pub struct SqliteStore {
    conn: Connection,
    source: String,
}

impl SqliteStore {
    /// Open a dataset file read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        info!("Opened reference dataset '{}'", path.display());

        Ok(Self {
            conn,
            source: path.display().to_string(),
        })
    }

    /// Build an in-memory dataset by running a SQL script.
    pub fn from_script(script: &str) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(script)?;
        debug!("Loaded in-memory reference dataset ({} bytes of SQL)", script.len());

        Ok(Self {
            conn,
            source: ":memory:".to_string(),
        })
    }

    /// Load the bundled dataset into memory.
    pub fn bundled() -> Result<Self, StoreError> {
        let store = Self::from_script(BUNDLED_DATASET)?;
        info!("Opened bundled reference dataset");
        Ok(store)
    }

    /// Where the dataset came from (a file path or `:memory:`).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Close the connection.
    pub fn close(self) -> Result<(), StoreError> {
        let source = self.source;
        self.conn.close().map_err(|(_, e)| StoreError::from(e))?;
        debug!("Closed reference dataset '{}'", source);
        Ok(())
    }
}

impl ReferenceStore for SqliteStore {
    fn query_many(&self, request: &QueryRequest) -> Result<Vec<Row>, StoreError> {
        debug!(sql = %request, params = ?request.params(), "Querying reference store");

        let mut stmt = match self.conn.prepare(request.sql()) {
            Ok(stmt) => stmt,
            Err(e) if !request.params().is_empty() && is_unknown_column(&e) => {
                warn!(sql = %request, "Filter names an unknown column, matching no rows: {}", e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let rows = stmt
            .query_map(params_from_iter(request.params().iter()), |sql_row| {
                let mut row = Row::new();
                for (idx, column) in columns.iter().enumerate() {
                    match sql_row.get_ref(idx)? {
                        ValueRef::Null => {}
                        ValueRef::Integer(value) => row.insert(column.as_str(), value.to_string()),
                        ValueRef::Real(value) => row.insert(column.as_str(), value.to_string()),
                        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                            row.insert(column.as_str(), String::from_utf8_lossy(bytes))
                        }
                    }
                }
                Ok(row)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

/// Whether `e` is SQLite rejecting a column name at prepare time.
fn is_unknown_column(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(_, Some(message)) if message.starts_with("no such column")
    )
}
