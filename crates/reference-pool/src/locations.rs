//! Location pools keyed by country/province/city filter.
//!
//! Every distinct filter gets its own [`ReferencePool`]. Pools are never
//! shared between filters, even when one filter is a subset of another.

use reference_store::{FetchRequest, FilterSpec, ReferenceStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::pool::{PrefetchConfig, ReferencePool};
use crate::records::{Location, LOCATIONS_QUERY};
use crate::PoolError;

/// Country/province/city constraints for a location draw.
///
/// Empty lists impose no constraint. Values are matched exactly against the
/// `country`, `province` and `city` columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationFilter {
    pub countries: Vec<String>,
    pub provinces: Vec<String>,
    pub cities: Vec<String>,
}

impl LocationFilter {
    pub fn new(countries: &[String], provinces: &[String], cities: &[String]) -> Self {
        Self {
            countries: countries.to_vec(),
            provinces: provinces.to_vec(),
            cities: cities.to_vec(),
        }
    }

    /// Matches every location.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries.extend(countries.into_iter().map(Into::into));
        self
    }

    pub fn with_provinces<I, S>(mut self, provinces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provinces.extend(provinces.into_iter().map(Into::into));
        self
    }

    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities.extend(cities.into_iter().map(Into::into));
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.countries.is_empty() && self.provinces.is_empty() && self.cities.is_empty()
    }

    /// Sorted, deduplicated copy used as the pool key.
    pub fn normalized(&self) -> Self {
        fn norm(values: &[String]) -> Vec<String> {
            let mut values = values.to_vec();
            values.sort();
            values.dedup();
            values
        }
        Self {
            countries: norm(&self.countries),
            provinces: norm(&self.provinces),
            cities: norm(&self.cities),
        }
    }

    /// Column constraints for the refill query.
    pub fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .with("country", self.countries.iter().cloned())
            .with("province", self.provinces.iter().cloned())
            .with("city", self.cities.iter().cloned())
    }

    /// Whether `location` satisfies every non-empty constraint.
    pub fn matches(&self, location: &Location) -> bool {
        fn allows(values: &[String], value: &str) -> bool {
            values.is_empty() || values.iter().any(|v| v == value)
        }
        allows(&self.countries, &location.country)
            && allows(&self.provinces, &location.province)
            && allows(&self.cities, &location.city)
    }
}

/// One location pool per distinct filter.
#[derive(Debug, Clone)]
pub struct LocationPool {
    prefetch: PrefetchConfig,
    pools: HashMap<LocationFilter, ReferencePool<Location>>,
}

impl LocationPool {
    pub fn new(prefetch: PrefetchConfig) -> Self {
        Self {
            prefetch,
            pools: HashMap::new(),
        }
    }

    /// Take a location matching `filter`, creating its pool on first use.
    pub fn take<S: ReferenceStore + ?Sized>(
        &mut self,
        store: &S,
        filter: &LocationFilter,
    ) -> Result<Location, PoolError> {
        self.pool_mut(filter).take(store)
    }

    /// The pool for `filter`, if one has been created.
    pub fn pool(&self, filter: &LocationFilter) -> Option<&ReferencePool<Location>> {
        self.pools.get(&filter.normalized())
    }

    /// Number of distinct filters seen so far.
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Total refill queries across all filters.
    pub fn refill_count(&self) -> u64 {
        self.pools.values().map(ReferencePool::refill_count).sum()
    }

    fn pool_mut(&mut self, filter: &LocationFilter) -> &mut ReferencePool<Location> {
        let key = filter.normalized();
        let prefetch = self.prefetch;
        self.pools.entry(key).or_insert_with_key(|key| {
            debug!(filter = %key.to_filter_spec(), "Creating location pool");
            ReferencePool::new(
                "location",
                FetchRequest::new(LOCATIONS_QUERY).with_filters(key.to_filter_spec()),
                prefetch,
            )
        })
    }
}
