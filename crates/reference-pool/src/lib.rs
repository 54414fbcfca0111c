//! Lazily refilled in-memory pools over the reference dataset.
//!
//! Turns one-row-at-a-time random lookups into batched refills: each
//! category keeps a stack of rows fetched with `ORDER BY RANDOM()`, pops from
//! it, and only goes back to the store when the stack runs dry.
//!
//! # Architecture
//!
//! ```text
//!                 ReferenceCache<S: ReferenceStore>
//!   ┌───────────────────────────────────────────────────────┐
//!   │ CategorizedNamePool   male │ female │ unisex          │
//!   │ ReferencePool<Surname>                                │
//!   │ LocationPool          LocationFilter ─▶ ReferencePool │
//!   │ ReferencePool<StreetType>      (whole table)          │
//!   │ ReferencePool<TopLevelDomain>  (whole table)          │
//!   └───────────────────────────┬───────────────────────────┘
//!                               │ miss: FetchRequest::build
//!                               ▼
//!                        S::query_many
//! ```
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use reference_pool::{CacheConfig, Gender, ReferenceCache};
//! use reference_store::SqliteStore;
//!
//! let store = SqliteStore::bundled().unwrap();
//! let mut cache = ReferenceCache::new(store, &CacheConfig::default());
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let name = cache.take_given_name(&mut rng, Gender::Female).unwrap();
//! let location = cache.take_location(&["CA".to_string()], &[], &[]).unwrap();
//! assert_eq!(location.country, "CA");
//! println!("{name} lives in {}", location.city);
//! ```

pub mod cache;
mod error;
pub mod locations;
pub mod names;
pub mod pool;
pub mod random;
pub mod records;

#[cfg(test)]
mod testing;

pub use cache::{CacheConfig, CacheStats, ReferenceCache};
pub use error::PoolError;
pub use locations::{LocationFilter, LocationPool};
pub use names::CategorizedNamePool;
pub use pool::{BatchSize, PrefetchConfig, PrefetchOverride, ReferencePool, MAX_EMPTY_REFILLS};
pub use random::{uniform_int, weighted_int};
pub use records::{Gender, GivenName, Location, NameCategory, StreetType, Surname, TopLevelDomain};
