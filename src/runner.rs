/// Generation entry point
///
/// Validates the configuration, then writes the tick file. Rows go to a `.partial`
/// sibling that is renamed onto the destination only after every row is written
/// and synced, so a failed run never leaves a truncated file at the destination.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, GeneratorConfig};
use crate::emitter::{EmitError, EventEmitter};
use crate::sink::{CsvSink, RecordSink, SinkError};
use crate::source::RngSource;
use crate::stats::RunStats;
use crate::walk::PriceWalk;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("sink failure: {0}")]
    Sink(#[from] SinkError),

    #[error("generation aborted: {0}")]
    Emit(#[from] EmitError),

    #[error("failed to {action} '{}'", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub path: PathBuf,
    pub records: u64,
    /// Seed actually used; pass it back in the config to reproduce the file
    pub seed: u64,
    pub stats: RunStats,
}

/// Build the emitter a config describes
pub fn build_emitter(config: &GeneratorConfig, seed: u64) -> EventEmitter<RngSource<ChaCha8Rng>> {
    EventEmitter::new(
        config.symbol.clone(),
        config.start_timestamp_ns,
        PriceWalk::new(config.initial_mid, config.spread),
        RngSource::seeded(seed),
    )
}

fn resolve_seed(config: &GeneratorConfig) -> u64 {
    config.seed.unwrap_or_else(rand::random)
}

/// Run the generator into a caller-supplied sink. Returns the seed used and the run stats.
pub fn generate_into<K: RecordSink + ?Sized>(
    config: &GeneratorConfig,
    sink: &mut K,
) -> Result<(u64, RunStats), GenerateError> {
    let ticks = config.ticks()?;
    let seed = resolve_seed(config);
    let stats = build_emitter(config, seed).run(ticks, sink)?;
    Ok((seed, stats))
}

/// Generate the configured tick file and report where it went
pub fn generate(config: &GeneratorConfig) -> Result<RunReport, GenerateError> {
    let ticks = config.ticks()?;
    let seed = resolve_seed(config);
    let path = config.output_path();

    info!(
        path = %path.display(),
        ticks,
        symbol = %config.symbol,
        seed,
        "generating synthetic ticks"
    );

    fs::create_dir_all(&config.output_dir).map_err(|source| GenerateError::Io {
        action: "create directory",
        path: config.output_dir.clone(),
        source,
    })?;

    let partial = partial_path(&path);
    let stats = match write_file(&partial, config, ticks, seed) {
        Ok(stats) => stats,
        Err(e) => {
            discard(&partial);
            return Err(e);
        }
    };

    if let Err(source) = fs::rename(&partial, &path) {
        discard(&partial);
        return Err(GenerateError::Io {
            action: "rename into",
            path,
            source,
        });
    }

    stats.log_summary();
    info!(path = %path.display(), records = stats.total_records(), "generation complete");

    Ok(RunReport {
        path,
        records: stats.total_records(),
        seed,
        stats,
    })
}

fn write_file(partial: &Path, config: &GeneratorConfig, ticks: u64, seed: u64) -> Result<RunStats, GenerateError> {
    let file = File::create(partial).map_err(|source| GenerateError::Io {
        action: "create",
        path: partial.to_path_buf(),
        source,
    })?;

    let mut sink = CsvSink::new(file)?;
    let stats = build_emitter(config, seed).run(ticks, &mut sink)?;

    let file = sink.into_inner()?;
    file.sync_all().map_err(|source| GenerateError::Io {
        action: "sync",
        path: partial.to_path_buf(),
        source,
    })?;

    Ok(stats)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

fn discard(partial: &Path) {
    if let Err(e) = fs::remove_file(partial) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %partial.display(), error = %e, "failed to remove partial output");
        }
    }
}
