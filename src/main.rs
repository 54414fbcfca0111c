//! Command-line interface for person-synth
//!
//! # Usage Examples
//!
//! ```bash
//! # Ten people from the bundled dataset, as JSON on stdout
//! person-synth generate
//!
//! # Reproducible Canadian households written to CSV
//! person-synth generate \
//!   --records 1000 \
//!   --seed 42 \
//!   --country CA \
//!   --households --max-household-size 5 \
//!   --format csv --output people.csv
//!
//! # Full dataset and settings from a config file
//! person-synth generate --config generator.yaml --database ReferenceData.sqlite
//! ```
//!
//! Set `RUST_LOG=debug` to see every pool refill.

use anyhow::Context;
use clap::{Parser, Subcommand};
use person_synth::{generate_batch, write_batch, GenerateArgs};
use std::fs::File;
use std::io::{self, BufWriter};

#[derive(Parser)]
#[command(name = "person-synth")]
#[command(about = "A tool for generating fictitious person and household records")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of person records
    Generate(GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
    }
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.load_config().context("Failed to load generator config")?;
    let batch = generate_batch(&config, args.records).context("Failed to generate batch")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
            write_batch(&batch, args.format, BufWriter::new(file))
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            tracing::info!(
                "Wrote {} records to '{}' ({} skipped)",
                batch.len(),
                path.display(),
                batch.skipped
            );
        }
        None => {
            write_batch(&batch, args.format, io::stdout().lock())
                .context("Failed to write output")?;
        }
    }

    Ok(())
}
