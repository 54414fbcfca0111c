//! Generation session: one store, one cache, one seeded RNG.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reference_pool::{uniform_int, Gender, LocationFilter, ReferenceCache};
use reference_store::{ReferenceStore, SqliteStore};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{GeneratorConfig, HouseholdConfig};
use crate::email::compose_email;
use crate::household::{household_sizes, Household};
use crate::person::{random_birthday, random_id, Address, Person};
use crate::SynthError;

/// Result of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Batch {
    pub households: Vec<Household>,
    /// Records dropped because a filter matched no reference rows.
    pub skipped: usize,
}

impl Batch {
    /// Every generated person, in household order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.households.iter().flat_map(|h| h.members.iter())
    }

    /// Number of generated persons.
    pub fn len(&self) -> usize {
        self.households.iter().map(Household::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns the reference cache for the duration of a run.
pub struct GenerationSession<S> {
    cache: ReferenceCache<S>,
    rng: StdRng,
    locations: LocationFilter,
    households: HouseholdConfig,
    reference_date: NaiveDate,
}

impl GenerationSession<SqliteStore> {
    /// Open the configured dataset, or the bundled one.
    pub fn open(config: &GeneratorConfig) -> Result<Self, SynthError> {
        let store = match &config.database {
            Some(path) => SqliteStore::open(path)?,
            None => SqliteStore::bundled()?,
        };
        Ok(Self::new(store, config))
    }

    /// Release the pools and close the store.
    pub fn close(self) -> Result<(), SynthError> {
        let stats = self.cache.stats();
        debug!(?stats, "Closing generation session");
        self.cache.into_store().close()?;
        Ok(())
    }
}

impl<S: ReferenceStore> GenerationSession<S> {
    pub fn new(store: S, config: &GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            cache: ReferenceCache::new(store, &config.prefetch),
            rng,
            locations: config.locations.normalized(),
            households: config.households,
            reference_date: config.reference_date(),
        }
    }

    /// Generate one person with their own surname and address.
    pub fn generate_person(&mut self) -> Result<Person, SynthError> {
        let surname = self.cache.take_surname()?;
        let address = self.draw_address()?;
        self.generate_member(surname, address)
    }

    /// Generate `size` people sharing a surname and an address.
    pub fn generate_household(&mut self, index: usize, size: usize) -> Result<Household, SynthError> {
        let surname = self.cache.take_surname()?;
        let address = self.draw_address()?;
        let members = (0..size)
            .map(|_| self.generate_member(surname.clone(), address.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Household { index, members })
    }

    /// Generate `records` people.
    ///
    /// Households whose reference draws hit an empty pool are skipped and
    /// counted; any other error aborts the batch.
    pub fn generate_batch(&mut self, records: usize) -> Result<Batch, SynthError> {
        let sizes = if self.households.enabled {
            household_sizes(&mut self.rng, records, self.households.max_size)
        } else {
            vec![1; records]
        };
        info!(
            "Generating {} records in {} households",
            records,
            sizes.len()
        );

        let mut batch = Batch::default();
        for size in sizes {
            let index = batch.households.len();
            match self.generate_household(index, size) {
                Ok(household) => batch.households.push(household),
                Err(e) if e.is_empty_pool() => {
                    warn!("Skipping {} record(s): {}", size, e);
                    batch.skipped += size;
                }
                Err(e) => return Err(e),
            }
        }

        let stats = self.cache.stats();
        info!(
            "Generated {} records ({} skipped); refills: {} given name, {} surname, {} location across {} filter(s)",
            batch.len(),
            batch.skipped,
            stats.given_name_refills,
            stats.surname_refills,
            stats.location_refills,
            stats.location_pools
        );
        Ok(batch)
    }

    pub fn cache(&self) -> &ReferenceCache<S> {
        &self.cache
    }

    fn draw_address(&mut self) -> Result<Address, SynthError> {
        let location = self.cache.take_location_matching(&self.locations)?;
        let street_name = self.cache.take_surname()?;
        let street_type = self.cache.take_street_type()?;
        let street_number = uniform_int(&mut self.rng, 1, 9999) as u32;
        Ok(Address::new(street_number, street_name, street_type, location))
    }

    fn generate_member(&mut self, surname: String, address: Address) -> Result<Person, SynthError> {
        let gender = Gender::random(&mut self.rng);
        let given_name = self.cache.take_given_name(&mut self.rng, gender)?;
        let tld = self.cache.take_top_level_domain()?;
        let email = compose_email(&mut self.rng, &given_name, &surname, &tld);

        Ok(Person {
            id: random_id(&mut self.rng),
            given_name,
            surname,
            gender,
            birthday: random_birthday(&mut self.rng, self.reference_date),
            email,
            address,
        })
    }
}

/// Open a session for `config`, generate `records` people and close the
/// store. The store is released even when generation fails.
pub fn generate_batch(config: &GeneratorConfig, records: usize) -> Result<Batch, SynthError> {
    let mut session = GenerationSession::open(config)?;
    let result = session.generate_batch(records);
    let closed = session.close();
    let batch = result?;
    closed?;
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reference_store::{QueryRequest, Row, StoreError};

    /// Serves the bundled dataset but fails every query mentioning `table`.
    struct FailingTable {
        inner: SqliteStore,
        table: &'static str,
    }

    impl ReferenceStore for FailingTable {
        fn query_many(&self, request: &QueryRequest) -> Result<Vec<Row>, StoreError> {
            if request.sql().contains(self.table) {
                return Err(StoreError::MissingColumn("name".to_string()));
            }
            self.inner.query_many(request)
        }
    }

    fn seeded_config() -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(42),
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_generate_person_fields() {
        let config = seeded_config();
        let mut session = GenerationSession::new(SqliteStore::bundled().unwrap(), &config);

        let person = session.generate_person().unwrap();
        assert!(!person.given_name.is_empty());
        assert!(!person.surname.is_empty());
        assert!(person.email.contains('@'));
        assert!((1..=9999).contains(&person.address.street_number));
        assert!(person.birthday <= config.reference_date());
        assert_eq!(person.id.get_version_num(), 4);
    }

    #[test]
    fn test_household_members_share_surname_and_address() {
        let mut session = GenerationSession::new(SqliteStore::bundled().unwrap(), &seeded_config());

        let household = session.generate_household(3, 4).unwrap();
        assert_eq!(household.index, 3);
        assert_eq!(household.len(), 4);
        let first = &household.members[0];
        for member in &household.members {
            assert_eq!(member.surname, first.surname);
            assert_eq!(member.address, first.address);
        }
    }

    #[test]
    fn test_unmatched_location_skips_records() {
        let config = GeneratorConfig {
            locations: LocationFilter::any().with_countries(["ZZ"]),
            ..seeded_config()
        };
        let mut session = GenerationSession::new(SqliteStore::bundled().unwrap(), &config);

        let batch = session.generate_batch(5).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.skipped, 5);
    }

    #[test]
    fn test_store_failure_aborts_batch() {
        let store = FailingTable {
            inner: SqliteStore::bundled().unwrap(),
            table: "StreetTypes",
        };
        let mut session = GenerationSession::new(store, &seeded_config());

        let err = session.generate_batch(3).unwrap_err();
        assert!(matches!(err, SynthError::Pool(_)));
        assert!(!err.is_empty_pool());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let config = seeded_config();
        let mut a = GenerationSession::new(SqliteStore::bundled().unwrap(), &config);
        let mut b = GenerationSession::new(SqliteStore::bundled().unwrap(), &config);

        let a: Vec<_> = (0..10).map(|_| a.generate_person().unwrap()).collect();
        let b: Vec<_> = (0..10).map(|_| b.generate_person().unwrap()).collect();
        for (a, b) in a.iter().zip(&b) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.gender, b.gender);
            assert_eq!(a.birthday, b.birthday);
            assert_eq!(a.address.street_number, b.address.street_number);
        }
    }
}
