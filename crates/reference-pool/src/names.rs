//! Given-name pool with male, female and unisex sub-pools.
//!
//! Selection is weighted by gender: a uniform selector in `0..3` indexes the
//! gender's candidate list (see [`Gender::name_candidates`]). The selected
//! sub-pool is used even when others hold entries, otherwise the weighting
//! would drift toward whichever sub-pool happens to be full.
//!
//! All three sub-pools share one refill routine. A refill fetches every
//! category the requested gender can draw from and sorts the rows into their
//! sub-pools by their own `gender` column, so one query can warm all three.

use rand::Rng;
use reference_store::{FetchRequest, FilterSpec, ReferenceStore};
use tracing::debug;

use crate::pool::{fetch_batch, BatchSize, PrefetchConfig};
use crate::random::uniform_int;
use crate::records::{Gender, GivenName, NameCategory, GIVEN_NAMES_QUERY};
use crate::PoolError;

/// Column the refill filters on.
const GENDER_COLUMN: &str = "gender";

#[derive(Debug, Clone)]
pub struct CategorizedNamePool {
    template: FetchRequest,
    batch: BatchSize,
    male: Vec<GivenName>,
    female: Vec<GivenName>,
    unisex: Vec<GivenName>,
    refills: u64,
}

impl CategorizedNamePool {
    pub fn new(prefetch: PrefetchConfig) -> Self {
        Self::with_template(FetchRequest::new(GIVEN_NAMES_QUERY), prefetch)
    }

    /// Use a custom base query. The query must select `name` and `gender`.
    pub fn with_template(template: FetchRequest, prefetch: PrefetchConfig) -> Self {
        Self {
            template,
            batch: prefetch.into(),
            male: Vec::new(),
            female: Vec::new(),
            unisex: Vec::new(),
            refills: 0,
        }
    }

    /// Take a name for `gender`.
    ///
    /// Draws a sub-pool; if it is empty, refills and draws again. When a
    /// refill comes back empty and every candidate sub-pool is empty too the
    /// call fails with [`PoolError::EmptyPool`]. If the refill was empty but
    /// another candidate still holds names, no further queries are issued
    /// during this call and the selector is simply redrawn.
    pub fn take<S, R>(&mut self, store: &S, rng: &mut R, gender: Gender) -> Result<GivenName, PoolError>
    where
        S: ReferenceStore + ?Sized,
        R: Rng,
    {
        let candidates = gender.name_candidates();
        let mut store_exhausted = false;

        loop {
            let selected = candidates[uniform_int(rng, 0, 2) as usize];
            if let Some(name) = self.sub_pool_mut(selected).pop() {
                return Ok(name);
            }

            if store_exhausted {
                continue;
            }

            debug!(%gender, category = selected.as_str(), "Given-name sub-pool empty");
            if self.refill(store, gender)? == 0 {
                if candidates.iter().all(|category| self.len(*category) == 0) {
                    return Err(PoolError::EmptyPool {
                        category: "given name",
                        filter: self.refill_filter(gender).to_string(),
                    });
                }
                store_exhausted = true;
            }
        }
    }

    /// Fetch one batch for `gender` and sort it into the sub-pools.
    /// Returns the row count.
    pub fn refill<S: ReferenceStore + ?Sized>(&mut self, store: &S, gender: Gender) -> Result<usize, PoolError> {
        let template = self.template.clone().with_filters(self.refill_filter(gender));
        let names: Vec<GivenName> = fetch_batch(store, &template, self.batch)?;
        let count = names.len();
        self.seed(names);
        self.refills += 1;

        debug!(
            %gender,
            fetched = count,
            male = self.male.len(),
            female = self.female.len(),
            unisex = self.unisex.len(),
            "Refilled given-name pools"
        );
        Ok(count)
    }

    /// Push names directly, each into the sub-pool of its own category.
    pub fn seed(&mut self, names: impl IntoIterator<Item = GivenName>) {
        for name in names {
            self.sub_pool_mut(name.category).push(name);
        }
    }

    /// Number of pooled names in one sub-pool.
    pub fn len(&self, category: NameCategory) -> usize {
        match category {
            NameCategory::Male => self.male.len(),
            NameCategory::Female => self.female.len(),
            NameCategory::Unisex => self.unisex.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty() && self.unisex.is_empty()
    }

    pub fn refill_count(&self) -> u64 {
        self.refills
    }

    fn refill_filter(&self, gender: Gender) -> FilterSpec {
        self.template.filters.clone().with(
            GENDER_COLUMN,
            gender.refill_categories().iter().map(|category| category.as_str()),
        )
    }

    fn sub_pool_mut(&mut self, category: NameCategory) -> &mut Vec<GivenName> {
        match category {
            NameCategory::Male => &mut self.male,
            NameCategory::Female => &mut self.female,
            NameCategory::Unisex => &mut self.unisex,
        }
    }
}
