//! Generic lazily refilled reference pool.
//!
//! A pool is a LIFO stack of rows fetched under one filter. `take` pops the
//! top entry; when the stack is empty it issues one refill query and retries.
//! A refill that returns nothing ends the take with
//! [`PoolError::EmptyPool`]: the store is immutable, so repeating the same
//! query cannot help.

use reference_store::{FetchRequest, FromRow, ReferenceStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PoolError;

/// Number of zero-row refills tolerated within one `take` before giving up.
pub const MAX_EMPTY_REFILLS: usize = 1;

/// Per-category prefetch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrefetchConfig {
    /// Fetch many rows per refill instead of one.
    pub enabled: bool,
    /// Upper bound on rows fetched per refill when enabled. `0` falls back
    /// to one row per refill.
    pub max: u32,
}

impl PrefetchConfig {
    /// Prefetch up to `max` rows per refill.
    pub fn new(max: u32) -> Self {
        Self { enabled: true, max }
    }

    /// Fetch a single row per refill.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max: 0,
        }
    }
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// A prefetch block as written in a config file. Keys left out keep the
/// category's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrefetchOverride {
    pub enabled: Option<bool>,
    pub max: Option<u32>,
}

impl PrefetchOverride {
    /// Fill the keys left out with `default`.
    pub fn resolve(self, default: PrefetchConfig) -> PrefetchConfig {
        PrefetchConfig {
            enabled: self.enabled.unwrap_or(default.enabled),
            max: self.max.unwrap_or(default.max),
        }
    }
}

/// How many rows a refill asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSize {
    /// One row per refill.
    Single,
    /// At most this many rows per refill.
    Capped(u32),
    /// Every matching row.
    All,
}

impl BatchSize {
    /// Limit clause value; `0` means no limit.
    pub fn limit(self) -> u32 {
        match self {
            BatchSize::Single => 1,
            BatchSize::Capped(max) => max,
            BatchSize::All => 0,
        }
    }
}

impl From<PrefetchConfig> for BatchSize {
    fn from(config: PrefetchConfig) -> Self {
        if config.enabled && config.max > 0 {
            BatchSize::Capped(config.max)
        } else {
            BatchSize::Single
        }
    }
}

/// Run one refill query and decode every returned row.
pub(crate) fn fetch_batch<T, S>(
    store: &S,
    template: &FetchRequest,
    batch: BatchSize,
) -> Result<Vec<T>, PoolError>
where
    T: FromRow,
    S: ReferenceStore + ?Sized,
{
    let request = template.clone().with_limit(batch.limit()).build();
    let rows = store.query_many(&request)?;
    let entries = rows
        .iter()
        .map(T::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// In-memory stack of reference entries for a single filter combination.
#[derive(Debug, Clone)]
pub struct ReferencePool<T> {
    category: &'static str,
    template: FetchRequest,
    batch: BatchSize,
    entries: Vec<T>,
    refills: u64,
}

impl<T: FromRow> ReferencePool<T> {
    /// Create an empty pool that refills with `template`.
    pub fn new(category: &'static str, template: FetchRequest, batch: impl Into<BatchSize>) -> Self {
        Self {
            category,
            template,
            batch: batch.into(),
            entries: Vec::new(),
            refills: 0,
        }
    }

    /// Pop an entry, refilling from the store first if the pool is empty.
    pub fn take<S: ReferenceStore + ?Sized>(&mut self, store: &S) -> Result<T, PoolError> {
        let mut empty_refills = 0;
        loop {
            if let Some(entry) = self.entries.pop() {
                return Ok(entry);
            }
            if empty_refills >= MAX_EMPTY_REFILLS {
                return Err(PoolError::EmptyPool {
                    category: self.category,
                    filter: self.template.filters.to_string(),
                });
            }
            if self.refill(store)? == 0 {
                empty_refills += 1;
            }
        }
    }

    /// Fetch one batch from the store and push it. Returns the row count.
    pub fn refill<S: ReferenceStore + ?Sized>(&mut self, store: &S) -> Result<usize, PoolError> {
        let fetched: Vec<T> = fetch_batch(store, &self.template, self.batch)?;
        let count = fetched.len();
        self.entries.extend(fetched);
        self.refills += 1;

        debug!(
            category = self.category,
            filter = %self.template.filters,
            fetched = count,
            pooled = self.entries.len(),
            "Refilled reference pool"
        );
        Ok(count)
    }
}

impl<T> ReferencePool<T> {
    /// Push entries directly, bypassing the store.
    pub fn seed(&mut self, entries: impl IntoIterator<Item = T>) {
        self.entries.extend(entries);
    }

    /// Number of pooled entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of refill queries issued so far.
    pub fn refill_count(&self) -> u64 {
        self.refills
    }
}
