//! Generator configuration loaded from YAML.
//!
//! ```yaml
//! seed: 42
//! database: data/ReferenceData.sqlite
//! prefetch:
//!   given_names: { enabled: true, max: 1000 }
//!   surnames: { enabled: true, max: 1000 }
//!   locations: { enabled: true, max: 10000 }
//! locations:
//!   countries: [CA]
//!   provinces: [British Columbia]
//! households:
//!   enabled: true
//!   max_size: 6
//! reference_date: 2024-01-01
//! ```
//!
//! Every key is optional.

use chrono::{NaiveDate, Utc};
use reference_pool::{CacheConfig, LocationFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::SynthError;

/// Household grouping settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdConfig {
    /// Group records into households sharing a surname and address.
    pub enabled: bool,
    /// Largest household size drawn.
    pub max_size: usize,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_size: 6,
        }
    }
}

/// Settings for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for in-process draws. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// SQLite dataset file. `None` uses the bundled sample dataset.
    pub database: Option<PathBuf>,
    /// Per-category prefetch settings.
    pub prefetch: CacheConfig,
    /// Constraints applied to every location draw.
    pub locations: LocationFilter,
    pub households: HouseholdConfig,
    /// Latest possible birthday. Defaults to today (UTC).
    pub reference_date: Option<NaiveDate>,
}

impl GeneratorConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml(yaml: &str) -> Result<Self, SynthError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SynthError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.households.max_size == 0 {
            return Err(SynthError::Config(
                "households.max_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}
