//! Read-only reference dataset access for person-synth.
//!
//! This crate provides the backing store the pool cache samples from, and
//! the filter query builder that scopes each refill.
//!
//! # Architecture
//!
//! ```text
//! FetchRequest { base, FilterSpec, order, limit }
//!        │
//!        ▼  build_query
//!   QueryRequest { sql, params }
//!        │
//!        ▼  ReferenceStore::query_many
//! ┌─────────────────┐
//! │   SqliteStore   │  (dataset file, read-only, or bundled SQL in memory)
//! └────────┬────────┘
//!          │
//!          ▼
//!       Vec<Row>  ──FromRow──▶  typed records
//! ```
//!
//! # Example
//!
//! ```rust
//! use reference_store::{FetchRequest, FilterSpec, ReferenceStore, SqliteStore};
//!
//! let store = SqliteStore::bundled().unwrap();
//! let request = FetchRequest::new("SELECT city, country FROM Locations")
//!     .with_filters(FilterSpec::new().with("country", ["CA"]))
//!     .with_limit(5)
//!     .build();
//!
//! for row in store.query_many(&request).unwrap() {
//!     assert_eq!(row.get("country"), Some("CA"));
//! }
//! ```

mod error;
pub mod query;
pub mod row;
pub mod sqlite;
mod store;

pub use error::StoreError;
pub use query::{build_query, FetchRequest, FilterSpec, QueryRequest, ORDER_RANDOM};
pub use row::{FromRow, Row};
pub use sqlite::{SqliteStore, BUNDLED_DATASET};
pub use store::ReferenceStore;
