//! CLI arguments for the `generate` command.

use clap::Args;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::output::OutputFormat;
use crate::SynthError;

/// Arguments for `person-synth generate`. Flags override the config file.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// YAML config file
    #[arg(long, short = 'c', value_name = "PATH", env = "PERSON_SYNTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite reference dataset (default: bundled sample dataset)
    #[arg(long, value_name = "PATH", env = "PERSON_SYNTH_DATABASE")]
    pub database: Option<PathBuf>,

    /// Number of records to generate
    #[arg(long, short = 'n', default_value_t = 10)]
    pub records: usize,

    /// Seed for reproducible draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Restrict locations to these countries (repeatable)
    #[arg(long = "country", value_name = "CODE")]
    pub countries: Vec<String>,

    /// Restrict locations to these provinces (repeatable)
    #[arg(long = "province", value_name = "NAME")]
    pub provinces: Vec<String>,

    /// Restrict locations to these cities (repeatable)
    #[arg(long = "city", value_name = "NAME")]
    pub cities: Vec<String>,

    /// Group records into households
    #[arg(long)]
    pub households: bool,

    /// Largest household size
    #[arg(long)]
    pub max_household_size: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Load the config file, if any, and apply flag overrides.
    pub fn load_config(&self) -> Result<GeneratorConfig, SynthError> {
        let config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        let config = self.apply_to(config);
        config.validate()?;
        Ok(config)
    }

    /// Overlay the flags that were given onto `config`.
    pub fn apply_to(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(database) = &self.database {
            config.database = Some(database.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if !self.countries.is_empty() {
            config.locations.countries = self.countries.clone();
        }
        if !self.provinces.is_empty() {
            config.locations.provinces = self.provinces.clone();
        }
        if !self.cities.is_empty() {
            config.locations.cities = self.cities.clone();
        }
        if self.households {
            config.households.enabled = true;
        }
        if let Some(max_size) = self.max_household_size {
            config.households.max_size = max_size;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use reference_pool::LocationFilter;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(argv: &[&str]) -> GenerateArgs {
        TestCli::parse_from(std::iter::once("person-synth").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.records, 10);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.output.is_none());

        let config = args.apply_to(GeneratorConfig::default());
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "--records",
            "25",
            "--seed",
            "9",
            "--country",
            "CA",
            "--country",
            "US",
            "--city",
            "Toronto",
            "--households",
            "--max-household-size",
            "3",
            "--format",
            "csv",
        ]);
        let base = GeneratorConfig {
            seed: Some(1),
            locations: LocationFilter::any().with_provinces(["Ontario"]),
            ..GeneratorConfig::default()
        };

        let config = args.apply_to(base);
        assert_eq!(args.records, 25);
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.locations.countries, ["CA", "US"]);
        assert_eq!(config.locations.provinces, ["Ontario"]);
        assert_eq!(config.locations.cities, ["Toronto"]);
        assert!(config.households.enabled);
        assert_eq!(config.households.max_size, 3);
    }

    #[test]
    fn test_load_config_rejects_zero_household_size() {
        let args = parse(&["--max-household-size", "0"]);
        assert!(matches!(args.load_config(), Err(SynthError::Config(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.yaml");
        std::fs::write(&path, "seed: 5\nlocations:\n  countries: [GB]\n").unwrap();

        let args = parse(&["--config", path.to_str().unwrap(), "--province", "Scotland"]);
        let config = args.load_config().unwrap();
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.locations.countries, ["GB"]);
        assert_eq!(config.locations.provinces, ["Scotland"]);
    }
}
