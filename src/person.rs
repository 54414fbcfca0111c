//! Person records.

use chrono::{Days, NaiveDate};
use rand::Rng;
use reference_pool::{uniform_int, Gender, Location};
use serde::Serialize;
use uuid::Uuid;

/// A fictitious person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub given_name: String,
    pub surname: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub email: String,
    pub address: Address,
}

/// A street address built from a pooled location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_number: u32,
    pub street_name: String,
    pub street_type: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        street_number: u32,
        street_name: impl Into<String>,
        street_type: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            street_number,
            street_name: street_name.into(),
            street_type: street_type.into(),
            city: location.city,
            province: location.province,
            country: location.country,
            postal_code: location.postal_code,
        }
    }

    /// `"{number} {name} {type}"`, e.g. `221 Baker Street`.
    pub fn street_line(&self) -> String {
        format!(
            "{} {} {}",
            self.street_number, self.street_name, self.street_type
        )
    }
}

/// Earliest birthday drawn.
pub fn earliest_birthday() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Draw a birthday uniformly between 1900-01-01 and `latest` inclusive.
pub fn random_birthday<R: Rng>(rng: &mut R, latest: NaiveDate) -> NaiveDate {
    let earliest = earliest_birthday();
    let span = latest.signed_duration_since(earliest).num_days().max(0);
    let offset = uniform_int(rng, 0, span) as u64;
    earliest
        .checked_add_days(Days::new(offset))
        .unwrap_or(latest)
}

/// A version 4 UUID drawn from `rng`.
pub fn random_id<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}
