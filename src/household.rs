//! Households: people sharing a surname and an address.

use rand::Rng;
use reference_pool::weighted_int;
use serde::Serialize;

use crate::person::Person;

/// A group of generated people. Ungrouped runs produce one-member
/// households.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Household {
    /// Position of the household within its batch.
    pub index: usize,
    pub members: Vec<Person>,
}

impl Household {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Split `records` into household sizes drawn from `weighted_int(1, max_size)`.
///
/// The last size is truncated so the sizes sum to exactly `records`.
pub fn household_sizes<R: Rng>(rng: &mut R, records: usize, max_size: usize) -> Vec<usize> {
    let max_size = max_size.max(1) as i64;
    let mut sizes = Vec::new();
    let mut remaining = records;

    while remaining > 0 {
        let size = (weighted_int(rng, 1, max_size) as usize).min(remaining);
        sizes.push(size);
        remaining -= size;
    }
    sizes
}
