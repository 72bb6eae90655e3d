/// Synthetic tick file generator
///
/// Writes a CSV of quotes and trades for one instrument.
/// Settings come from defaults, then an optional TOML file, then command-line flags.
///
/// Usage: synth_gen --ticks 5000 --symbol ABC --seed 42

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tick_synth::{generate, GeneratorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "synth_gen", about = "Generate a synthetic quote/trade tick file")]
struct Args {
    /// TOML config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Directory the tick file is written into
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Tick file name
    #[arg(long)]
    file_name: Option<String>,

    /// Number of ticks to generate
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    ticks: Option<i64>,

    /// Instrument symbol
    #[arg(long, short)]
    symbol: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path.display().to_string())
                .with_context(|| format!("loading {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(name) = self.file_name {
            config.file_name = name;
        }
        if let Some(ticks) = self.ticks {
            config.tick_count = ticks;
        }
        if let Some(symbol) = self.symbol {
            config.symbol = symbol;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Args::parse().into_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let report = generate(&config)?;

    println!(
        "Generated {} with {} ticks (seed {})",
        report.path.display(),
        report.records,
        report.seed
    );

    Ok(())
}
