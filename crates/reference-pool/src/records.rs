//! Typed reference records and the queries that select them.

use rand::Rng;
use reference_store::{FromRow, Row, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::random::uniform_int;

pub const GIVEN_NAMES_QUERY: &str = "SELECT name, gender FROM GivenNames";
pub const SURNAMES_QUERY: &str = "SELECT name FROM Surnames";
pub const LOCATIONS_QUERY: &str = "SELECT city, province, country, postalCode FROM Locations";
pub const STREET_TYPES_QUERY: &str = "SELECT name, abbreviation FROM StreetTypes";
pub const TOP_LEVEL_DOMAINS_QUERY: &str = "SELECT domain FROM TopLevelDomains";

/// Gender of a generated person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Draw a gender uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[uniform_int(rng, 0, 2) as usize]
    }

    /// Sub-pools a name for this gender is drawn from, indexed by a uniform
    /// selector in `0..3`. Repeating a category doubles its weight.
    pub fn name_candidates(self) -> [NameCategory; 3] {
        match self {
            Gender::Male => [NameCategory::Male, NameCategory::Male, NameCategory::Unisex],
            Gender::Female => [NameCategory::Female, NameCategory::Female, NameCategory::Unisex],
            Gender::Other => [NameCategory::Male, NameCategory::Female, NameCategory::Unisex],
        }
    }

    /// Name categories fetched by a refill on behalf of this gender.
    pub fn refill_categories(self) -> &'static [NameCategory] {
        match self {
            Gender::Male => &[NameCategory::Unisex, NameCategory::Male],
            Gender::Female => &[NameCategory::Unisex, NameCategory::Female],
            Gender::Other => &[NameCategory::Unisex, NameCategory::Male, NameCategory::Female],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `gender` column of the GivenNames table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCategory {
    Male,
    Female,
    Unisex,
}

impl NameCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            NameCategory::Male => "male",
            NameCategory::Female => "female",
            NameCategory::Unisex => "unisex",
        }
    }

    fn parse(value: &str) -> Result<Self, StoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(NameCategory::Male),
            "female" => Ok(NameCategory::Female),
            "unisex" => Ok(NameCategory::Unisex),
            _ => Err(StoreError::InvalidValue {
                column: "gender".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// A row of the GivenNames table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenName {
    pub name: String,
    pub category: NameCategory,
}

impl GivenName {
    pub fn new(name: impl Into<String>, category: NameCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

impl FromRow for GivenName {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            name: row.require("name")?.to_string(),
            category: NameCategory::parse(row.require("gender")?)?,
        })
    }
}

/// A row of the Surnames table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surname {
    pub name: String,
}

impl FromRow for Surname {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            name: row.require("name")?.to_string(),
        })
    }
}

/// A postal location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
}

impl FromRow for Location {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            city: row.require("city")?.to_string(),
            province: row.require("province")?.to_string(),
            country: row.require("country")?.to_string(),
            postal_code: row.require("postalCode")?.to_string(),
        })
    }
}

/// A street suffix such as `Avenue` / `Ave`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetType {
    pub name: String,
    pub abbreviation: Option<String>,
}

impl FromRow for StreetType {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            name: row.require("name")?.to_string(),
            abbreviation: row.get("abbreviation").map(str::to_string),
        })
    }
}

/// A top-level domain without the leading dot, e.g. `com` or `co.uk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevelDomain {
    pub domain: String,
}

impl FromRow for TopLevelDomain {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            domain: row.require("domain")?.trim_start_matches('.').to_string(),
        })
    }
}
