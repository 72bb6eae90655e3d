/// Event emitter
///
/// Drives the simulation one tick at a time: advance the clock, step the price walk,
/// then classify the tick as a quote or a trade and build the record. Trades always
/// print at the bid or ask of the same tick's top of book.
///
/// Draw order per tick is fixed so seeded runs reproduce exactly:
///   time step, drift, classifier, then (bid size, ask size) or (side, trade size).

use crate::protocol::{Quote, Record, Trade};
use crate::sink::{RecordSink, SinkError};
use crate::source::TickSource;
use crate::stats::RunStats;
use crate::walk::{PriceWalk, Side, TopOfBook};
use thiserror::Error;
use tracing::debug;

/// Probability that a tick is a quote rather than a trade
pub const QUOTE_PROBABILITY: f64 = 0.7;

/// Probability that a trade lifts the ask rather than hitting the bid
pub const ASK_PROBABILITY: f64 = 0.5;

pub const DEFAULT_TICK_COUNT: u64 = 1000;
pub const DEFAULT_SYMBOL: &str = "SYNTH";

/// 2023-01-01 09:30:00 UTC
pub const DEFAULT_START_TIMESTAMP_NS: u64 = 1_672_565_400_000_000_000;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("nanosecond clock exhausted after {emitted} records")]
    ClockExhausted { emitted: u64 },
}

pub type EmitResult<T> = Result<T, EmitError>;

pub struct EventEmitter<S> {
    symbol: String,
    timestamp_ns: u64,
    walk: PriceWalk,
    source: S,
}

impl<S: TickSource> EventEmitter<S> {
    /// The first record is stamped strictly after `start_timestamp_ns`
    pub fn new(symbol: impl Into<String>, start_timestamp_ns: u64, walk: PriceWalk, source: S) -> Self {
        EventEmitter {
            symbol: symbol.into(),
            timestamp_ns: start_timestamp_ns,
            walk,
            source,
        }
    }

    /// Generate one tick; returns the record and the top of book it was derived from.
    /// None once the next time step would run past `u64::MAX`; the clock never wraps.
    pub fn next_tick(&mut self) -> Option<(Record, TopOfBook)> {
        self.timestamp_ns = self.timestamp_ns.checked_add(self.source.time_step_ns())?;

        let drift = self.source.drift();
        let book = self.walk.step(drift);

        let record = if self.source.classify() < QUOTE_PROBABILITY {
            let bid_size = self.source.book_size();
            let ask_size = self.source.book_size();
            Record::Quote(Quote {
                timestamp_ns: self.timestamp_ns,
                symbol: self.symbol.clone(),
                bid_price: book.bid,
                bid_size,
                ask_price: book.ask,
                ask_size,
            })
        } else {
            // The walk always produces both sides, so no mid-price fallback is needed
            debug_assert!(book.spread() > 0.0, "crossed or locked book: {:?}", book);
            let side = if self.source.side() < ASK_PROBABILITY {
                Side::Ask
            } else {
                Side::Bid
            };
            Record::Trade(Trade {
                timestamp_ns: self.timestamp_ns,
                symbol: self.symbol.clone(),
                price: book.price(side),
                size: self.source.trade_size(),
            })
        };

        Some((record, book))
    }

    pub fn next_record(&mut self) -> Option<Record> {
        self.next_tick().map(|(record, _)| record)
    }

    /// Emit exactly `ticks` records into `sink`, then flush it.
    /// The first sink error, or running out of clock, aborts the run.
    pub fn run<K: RecordSink + ?Sized>(&mut self, ticks: u64, sink: &mut K) -> EmitResult<RunStats> {
        debug!(
            symbol = %self.symbol,
            ticks,
            start_ns = self.timestamp_ns,
            mid = self.walk.mid(),
            spread = self.walk.spread(),
            "emitter starting"
        );

        let mut stats = RunStats::new();
        for emitted in 0..ticks {
            let (record, book) = self
                .next_tick()
                .ok_or(EmitError::ClockExhausted { emitted })?;
            sink.write(&record)?;
            stats.record(&record, &book);
        }
        sink.flush()?;
        stats.finish();

        Ok(stats)
    }

    /// Timestamp of the last generated tick
    pub fn timestamp_ns(&self) -> u64 {
        self.timestamp_ns
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn walk(&self) -> &PriceWalk {
        &self.walk
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

/// Stream of records, ending only when the clock is exhausted
impl<S: TickSource> Iterator for EventEmitter<S> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.next_record()
    }
}
