//! Reference cache: every pool a generation session samples from.

use rand::Rng;
use reference_store::{FetchRequest, ReferenceStore};
use serde::{Deserialize, Serialize};

use crate::locations::{LocationFilter, LocationPool};
use crate::names::CategorizedNamePool;
use crate::pool::{BatchSize, PrefetchConfig, PrefetchOverride, ReferencePool};
use crate::records::{
    Gender, Location, StreetType, Surname, TopLevelDomain, STREET_TYPES_QUERY, SURNAMES_QUERY,
    TOP_LEVEL_DOMAINS_QUERY,
};
use crate::PoolError;

/// Prefetch settings for each filterable category.
///
/// Street types and top-level domains are small lookup tables and are always
/// fetched whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CacheConfigFile")]
pub struct CacheConfig {
    pub given_names: PrefetchConfig,
    pub surnames: PrefetchConfig,
    pub locations: PrefetchConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            given_names: PrefetchConfig::new(1000),
            surnames: PrefetchConfig::new(1000),
            locations: PrefetchConfig::new(10_000),
        }
    }
}

/// `CacheConfig` as written in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CacheConfigFile {
    given_names: PrefetchOverride,
    surnames: PrefetchOverride,
    locations: PrefetchOverride,
}

impl From<CacheConfigFile> for CacheConfig {
    fn from(file: CacheConfigFile) -> Self {
        let defaults = CacheConfig::default();
        Self {
            given_names: file.given_names.resolve(defaults.given_names),
            surnames: file.surnames.resolve(defaults.surnames),
            locations: file.locations.resolve(defaults.locations),
        }
    }
}

/// Refill counters, for logging at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub given_name_refills: u64,
    pub surname_refills: u64,
    pub location_refills: u64,
    pub location_pools: usize,
    pub street_type_refills: u64,
    pub top_level_domain_refills: u64,
}

/// Owns the store handle and every pool drawn from it.
///
/// One cache belongs to one generation session; all access goes through
/// `&mut self`, so refills never overlap.
pub struct ReferenceCache<S> {
    store: S,
    given_names: CategorizedNamePool,
    surnames: ReferencePool<Surname>,
    locations: LocationPool,
    street_types: ReferencePool<StreetType>,
    top_level_domains: ReferencePool<TopLevelDomain>,
}

impl<S: ReferenceStore> ReferenceCache<S> {
    pub fn new(store: S, config: &CacheConfig) -> Self {
        Self {
            store,
            given_names: CategorizedNamePool::new(config.given_names),
            surnames: ReferencePool::new("surname", FetchRequest::new(SURNAMES_QUERY), config.surnames),
            locations: LocationPool::new(config.locations),
            street_types: ReferencePool::new(
                "street type",
                FetchRequest::new(STREET_TYPES_QUERY),
                BatchSize::All,
            ),
            top_level_domains: ReferencePool::new(
                "top-level domain",
                FetchRequest::new(TOP_LEVEL_DOMAINS_QUERY),
                BatchSize::All,
            ),
        }
    }

    pub fn take_given_name<R: Rng>(&mut self, rng: &mut R, gender: Gender) -> Result<String, PoolError> {
        Ok(self.given_names.take(&self.store, rng, gender)?.name)
    }

    pub fn take_surname(&mut self) -> Result<String, PoolError> {
        Ok(self.surnames.take(&self.store)?.name)
    }

    /// Take a location; empty slices leave that column unconstrained.
    pub fn take_location(
        &mut self,
        countries: &[String],
        provinces: &[String],
        cities: &[String],
    ) -> Result<Location, PoolError> {
        self.take_location_matching(&LocationFilter::new(countries, provinces, cities))
    }

    pub fn take_location_matching(&mut self, filter: &LocationFilter) -> Result<Location, PoolError> {
        self.locations.take(&self.store, filter)
    }

    pub fn take_street_type(&mut self) -> Result<String, PoolError> {
        Ok(self.street_types.take(&self.store)?.name)
    }

    pub fn take_top_level_domain(&mut self) -> Result<String, PoolError> {
        Ok(self.top_level_domains.take(&self.store)?.domain)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            given_name_refills: self.given_names.refill_count(),
            surname_refills: self.surnames.refill_count(),
            location_refills: self.locations.refill_count(),
            location_pools: self.locations.pool_count(),
            street_type_refills: self.street_types.refill_count(),
            top_level_domain_refills: self.top_level_domains.refill_count(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop every pool and hand back the store, e.g. to close it.
    pub fn into_store(self) -> S {
        self.store
    }
}
