/// Tick Synth - Synthetic Market Data Generator
///
/// Deterministic, seedable generator of single-instrument market data for feeding
/// replay and simulation tools. Features include:
/// - Clamped mid-price random walk with a fixed bid/ask spread
/// - Quote/trade classification with trades printed at the same tick's bid or ask
/// - Pluggable record sinks (CSV file, in-memory)
/// - CSV reader for generated tick files
/// - TOML configuration with validation before any output is created
/// - Per-run statistics

pub mod protocol;
pub mod walk;
pub mod source;
pub mod emitter;
pub mod sink;
pub mod reader;
pub mod config;
pub mod stats;
pub mod runner;

pub use protocol::{Record, RecordType, Quote, Trade, CsvRow, COLUMNS};
pub use walk::{PriceWalk, TopOfBook, Side};
pub use source::{TickSource, RngSource};
pub use emitter::{EventEmitter, EmitError};
pub use sink::{RecordSink, CsvSink, VecSink, SinkError};
pub use reader::{read_records, ParseError};
pub use config::{GeneratorConfig, ConfigError};
pub use stats::RunStats;
pub use runner::{generate, generate_into, GenerateError, RunReport};
