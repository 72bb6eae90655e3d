/// Run statistics
///
/// Counts quotes and trades, tracks the simulated time span and the mid-price range
/// seen during a run, plus wall-clock throughput of the generator itself.

use std::time::{Duration, Instant};

use crate::protocol::Record;
use crate::walk::TopOfBook;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunStats {
    // Timing
    start_time: Option<Instant>,
    elapsed: Option<Duration>,

    // Counts
    quotes: u64,
    trades: u64,
    trade_volume: u64,

    // Simulated extents
    first_timestamp_ns: Option<u64>,
    last_timestamp_ns: Option<u64>,
    min_mid: f64,
    max_mid: f64,
}

impl RunStats {
    pub fn new() -> Self {
        RunStats {
            start_time: None,
            elapsed: None,
            quotes: 0,
            trades: 0,
            trade_volume: 0,
            first_timestamp_ns: None,
            last_timestamp_ns: None,
            min_mid: f64::INFINITY,
            max_mid: f64::NEG_INFINITY,
        }
    }

    /// Record an emitted record and the top of book it was derived from
    pub fn record(&mut self, record: &Record, book: &TopOfBook) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }

        match record {
            Record::Quote(_) => self.quotes += 1,
            Record::Trade(t) => {
                self.trades += 1;
                self.trade_volume += u64::from(t.size);
            }
        }

        let ts = record.timestamp_ns();
        self.first_timestamp_ns.get_or_insert(ts);
        self.last_timestamp_ns = Some(ts);

        self.min_mid = self.min_mid.min(book.mid);
        self.max_mid = self.max_mid.max(book.mid);
    }

    /// Freeze the wall-clock duration
    pub fn finish(&mut self) {
        self.elapsed = self.start_time.map(|st| st.elapsed());
    }

    pub fn total_records(&self) -> u64 {
        self.quotes + self.trades
    }

    pub fn quotes(&self) -> u64 {
        self.quotes
    }

    pub fn trades(&self) -> u64 {
        self.trades
    }

    pub fn trade_volume(&self) -> u64 {
        self.trade_volume
    }

    pub fn last_timestamp_ns(&self) -> Option<u64> {
        self.last_timestamp_ns
    }

    /// Simulated time covered between the first and last record
    pub fn simulated_span(&self) -> Option<Duration> {
        match (self.first_timestamp_ns, self.last_timestamp_ns) {
            (Some(first), Some(last)) => Some(Duration::from_nanos(last - first)),
            _ => None,
        }
    }

    /// (min, max) mid price, None before the first record
    pub fn mid_range(&self) -> Option<(f64, f64)> {
        if self.total_records() == 0 {
            None
        } else {
            Some((self.min_mid, self.max_mid))
        }
    }

    /// Fraction of records that are quotes
    pub fn quote_ratio(&self) -> f64 {
        let total = self.total_records();
        if total == 0 {
            0.0
        } else {
            self.quotes as f64 / total as f64
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
            .or_else(|| self.start_time.map(|st| st.elapsed()))
    }

    /// Generated records per wall-clock second
    pub fn records_per_sec(&self) -> f64 {
        match self.elapsed() {
            None => 0.0,
            Some(elapsed) => {
                let secs = elapsed.as_secs_f64();
                if secs > 0.0 {
                    self.total_records() as f64 / secs
                } else {
                    0.0
                }
            }
        }
    }

    /// Log a one-line summary of the run
    pub fn log_summary(&self) {
        let (min_mid, max_mid) = self.mid_range().unwrap_or((0.0, 0.0));
        info!(
            records = self.total_records(),
            quotes = self.quotes,
            trades = self.trades,
            quote_ratio = self.quote_ratio(),
            trade_volume = self.trade_volume,
            min_mid,
            max_mid,
            simulated_span = ?self.simulated_span(),
            records_per_sec = self.records_per_sec().round(),
            "generation summary"
        );
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
