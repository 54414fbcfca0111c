//! person-synth: fictitious person and household records from a reference
//! dataset.
//!
//! Reference rows (names, locations, street types, domains) come from a
//! read-only SQLite dataset through the pool cache in `reference-pool`, so
//! most draws are served from memory and the dataset is only queried when a
//! pool runs dry.
//!
//! # Example
//!
//! ```rust
//! use person_synth::{generate_batch, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     seed: Some(42),
//!     ..GeneratorConfig::default()
//! };
//! let batch = generate_batch(&config, 5).unwrap();
//! assert_eq!(batch.len() + batch.skipped, 5);
//! ```

pub mod args;
pub mod config;
pub mod email;
mod error;
pub mod household;
pub mod output;
pub mod person;
pub mod session;

pub use args::GenerateArgs;
pub use config::{GeneratorConfig, HouseholdConfig};
pub use error::SynthError;
pub use household::Household;
pub use output::{write_batch, OutputFormat};
pub use person::{Address, Person};
pub use session::{generate_batch, Batch, GenerationSession};
