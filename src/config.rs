/// Generator configuration
///
/// Defaults, TOML loading and up-front validation. Everything a run needs is
/// checked here, before any output is created.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::source::MAX_TIME_STEP_NS;
use crate::walk::{book_stays_open, MAX_MID, MIN_MID};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "defaults::file_name")]
    pub file_name: String,
    #[serde(default = "defaults::tick_count")]
    pub tick_count: i64,
    #[serde(default = "defaults::symbol")]
    pub symbol: String,
    /// Fixed seed for reproducible output; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "defaults::start_timestamp_ns")]
    pub start_timestamp_ns: u64,
    #[serde(default = "defaults::initial_mid")]
    pub initial_mid: f64,
    #[serde(default = "defaults::spread")]
    pub spread: f64,
    /// Only read by the `synth_gen` binary when it sets up logging
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("tick count must be positive, got {0}")]
    InvalidTickCount(i64),

    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("spread {0} does not keep bid below ask after rounding to cents")]
    InvalidSpread(f64),

    #[error("{ticks} ticks from start {start_ns} may run past the end of the nanosecond clock")]
    ClockOverflow { start_ns: u64, ticks: i64 },

    #[error("initial mid {0} outside the walk range [90, 110]")]
    InvalidInitialMid(f64),

    #[error("file name must not be empty")]
    EmptyFileName,
}

mod defaults {
    use std::path::PathBuf;

    use crate::emitter::{DEFAULT_START_TIMESTAMP_NS, DEFAULT_SYMBOL, DEFAULT_TICK_COUNT};
    use crate::walk::{DEFAULT_INITIAL_MID, DEFAULT_SPREAD};

    pub fn output_dir() -> PathBuf {
        PathBuf::from("data")
    }

    pub fn file_name() -> String {
        "synthetic_ticks.csv".into()
    }

    pub fn tick_count() -> i64 {
        DEFAULT_TICK_COUNT as i64
    }

    pub fn symbol() -> String {
        DEFAULT_SYMBOL.into()
    }

    pub fn start_timestamp_ns() -> u64 {
        DEFAULT_START_TIMESTAMP_NS
    }

    pub fn initial_mid() -> f64 {
        DEFAULT_INITIAL_MID
    }

    pub fn spread() -> f64 {
        DEFAULT_SPREAD
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

impl GeneratorConfig {
    pub fn load(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        let toml_to_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&toml_to_str)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Reject settings that would make a run meaningless. Called before any output is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_count <= 0 {
            return Err(ConfigError::InvalidTickCount(self.tick_count));
        }
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        if self.file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        if !book_stays_open(self.spread) {
            return Err(ConfigError::InvalidSpread(self.spread));
        }
        let last_ns = (self.tick_count as u64)
            .checked_mul(MAX_TIME_STEP_NS)
            .and_then(|span| self.start_timestamp_ns.checked_add(span));
        if last_ns.is_none() {
            return Err(ConfigError::ClockOverflow {
                start_ns: self.start_timestamp_ns,
                ticks: self.tick_count,
            });
        }
        if !(MIN_MID..=MAX_MID).contains(&self.initial_mid) {
            return Err(ConfigError::InvalidInitialMid(self.initial_mid));
        }
        Ok(())
    }

    /// Validated tick count
    pub fn ticks(&self) -> Result<u64, ConfigError> {
        self.validate()?;
        u64::try_from(self.tick_count).map_err(|_| ConfigError::InvalidTickCount(self.tick_count))
    }

    /// Destination file: `output_dir` joined with `file_name`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_dir: defaults::output_dir(),
            file_name: defaults::file_name(),
            tick_count: defaults::tick_count(),
            symbol: defaults::symbol(),
            seed: None,
            start_timestamp_ns: defaults::start_timestamp_ns(),
            initial_mid: defaults::initial_mid(),
            spread: defaults::spread(),
            log_level: defaults::log_level(),
        }
    }
}
