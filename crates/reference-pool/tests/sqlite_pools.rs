//! Pool behavior against real SQLite datasets.

use rand::rngs::StdRng;
use rand::SeedableRng;
use reference_pool::{
    CacheConfig, Gender, LocationFilter, PrefetchConfig, ReferenceCache,
};
use reference_store::{QueryRequest, ReferenceStore, Row, SqliteStore, StoreError};
use std::cell::Cell;

const SEED: u64 = 42;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Counts queries and can be switched to return nothing, as if the
/// underlying tables had been emptied.
struct SwitchableStore {
    inner: SqliteStore,
    drained: Cell<bool>,
    queries: Cell<usize>,
}

impl SwitchableStore {
    fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            drained: Cell::new(false),
            queries: Cell::new(0),
        }
    }
}

impl ReferenceStore for SwitchableStore {
    fn query_many(&self, request: &QueryRequest) -> Result<Vec<Row>, StoreError> {
        self.queries.set(self.queries.get() + 1);
        if self.drained.get() {
            return Ok(Vec::new());
        }
        self.inner.query_many(request)
    }
}

const TWO_FEMALE_ONE_UNISEX: &str = r#"
CREATE TABLE GivenNames (name TEXT NOT NULL, gender TEXT NOT NULL);
INSERT INTO GivenNames (name, gender) VALUES
    ('Mary', 'female'), ('Laura', 'female'), ('Jordan', 'unisex'), ('Brian', 'male');
"#;

#[test]
fn test_location_filter_fidelity() {
    init_tracing();
    let store = SqliteStore::bundled().unwrap();
    let mut cache = ReferenceCache::new(store, &CacheConfig::default());

    let filter = LocationFilter::any()
        .with_countries(["CA"])
        .with_provinces(["British Columbia", "Quebec"]);
    for _ in 0..50 {
        let location = cache.take_location_matching(&filter).unwrap();
        assert!(filter.matches(&location), "{location:?} escaped {filter:?}");
    }
}

#[test]
fn test_unmatched_location_filter_is_recoverable() {
    init_tracing();
    let store = SqliteStore::bundled().unwrap();
    let mut cache = ReferenceCache::new(store, &CacheConfig::default());

    let err = cache
        .take_location(&["CA".to_string()], &["Texas".to_string()], &[])
        .unwrap_err();
    assert!(err.is_empty_pool());

    // The cache is still usable for other filters.
    let location = cache.take_location(&["US".to_string()], &[], &[]).unwrap();
    assert_eq!(location.country, "US");
}

#[test]
fn test_three_female_names_then_empty_pool() {
    init_tracing();
    let store = SwitchableStore::new(SqliteStore::from_script(TWO_FEMALE_ONE_UNISEX).unwrap());
    let config = CacheConfig {
        given_names: PrefetchConfig::new(10),
        ..CacheConfig::default()
    };
    let mut cache = ReferenceCache::new(store, &config);
    let mut rng = StdRng::seed_from_u64(SEED);

    // First draw warms every sub-pool the female filter covers.
    let mut drawn = vec![cache.take_given_name(&mut rng, Gender::Female).unwrap()];
    assert_eq!(cache.store().queries.get(), 1);

    // The tables are emptied; the two remaining names come from memory.
    cache.store().drained.set(true);
    for _ in 0..2 {
        drawn.push(cache.take_given_name(&mut rng, Gender::Female).unwrap());
    }
    drawn.sort();
    assert_eq!(drawn, ["Jordan", "Laura", "Mary"]);

    let before = cache.store().queries.get();
    let err = cache.take_given_name(&mut rng, Gender::Female).unwrap_err();
    assert!(err.is_empty_pool());
    assert_eq!(cache.store().queries.get(), before + 1);
}

#[test]
fn test_male_draws_never_return_female_names() {
    init_tracing();
    let store = SqliteStore::bundled().unwrap();
    let female: Vec<String> = store
        .query_many(
            &reference_store::FetchRequest::new("SELECT name, gender FROM GivenNames")
                .with_filters(reference_store::FilterSpec::new().with("gender", ["female"]))
                .build(),
        )
        .unwrap()
        .into_iter()
        .filter_map(|row| row.get("name").map(str::to_string))
        .collect();

    let mut cache = ReferenceCache::new(store, &CacheConfig::default());
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..200 {
        let name = cache.take_given_name(&mut rng, Gender::Male).unwrap();
        assert!(!female.contains(&name), "{name} drawn for male");
    }
}

#[test]
fn test_prefetch_disabled_queries_once_per_draw() {
    init_tracing();
    let store = SwitchableStore::new(SqliteStore::bundled().unwrap());
    let config = CacheConfig {
        surnames: PrefetchConfig::disabled(),
        ..CacheConfig::default()
    };
    let mut cache = ReferenceCache::new(store, &config);

    for expected in 1..=5 {
        cache.take_surname().unwrap();
        assert_eq!(cache.store().queries.get(), expected);
    }
}

#[test]
fn test_lookup_tables_are_loaded_once() {
    init_tracing();
    let store = SwitchableStore::new(SqliteStore::bundled().unwrap());
    let mut cache = ReferenceCache::new(store, &CacheConfig::default());

    // The bundled dataset has 10 street types and 8 domains.
    for _ in 0..8 {
        cache.take_street_type().unwrap();
        cache.take_top_level_domain().unwrap();
    }
    assert_eq!(cache.store().queries.get(), 2);

    let stats = cache.stats();
    assert_eq!(stats.street_type_refills, 1);
    assert_eq!(stats.top_level_domain_refills, 1);
}

#[test]
fn test_unknown_filter_column_is_empty_pool() {
    init_tracing();
    let store = SqliteStore::bundled().unwrap();
    let template = reference_store::FetchRequest::new(reference_pool::records::GIVEN_NAMES_QUERY)
        .with_filters(reference_store::FilterSpec::new().with("nickname", ["Ally"]));
    let mut pool = reference_pool::CategorizedNamePool::with_template(template, PrefetchConfig::new(10));
    let mut rng = StdRng::seed_from_u64(SEED);

    let err = pool.take(&store, &mut rng, Gender::Female).unwrap_err();
    assert!(err.is_empty_pool(), "{err}");
    assert_eq!(pool.refill_count(), 1);
}
