/// Random draws consumed by the emitter
///
/// Every random quantity a tick needs goes through `TickSource`, one method per draw.
/// `RngSource` implements it over any `rand::Rng`; tests substitute scripted sources
/// to force a branch or a drift.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::walk::MAX_DRIFT;

pub const MIN_TIME_STEP_NS: u64 = 10_000_000;
pub const MAX_TIME_STEP_NS: u64 = 500_000_000;

/// Book sizes are drawn in lots and multiplied by `BOOK_LOT`
pub const MIN_BOOK_LOTS: u32 = 100;
pub const MAX_BOOK_LOTS: u32 = 1000;
pub const BOOK_LOT: u32 = 10;

pub const MIN_TRADE_SIZE: u32 = 10;
pub const MAX_TRADE_SIZE: u32 = 200;

pub trait TickSource {
    /// Nanoseconds between consecutive ticks, in [MIN_TIME_STEP_NS, MAX_TIME_STEP_NS]
    fn time_step_ns(&mut self) -> u64;

    /// Mid-price drift, in [-MAX_DRIFT, MAX_DRIFT]
    fn drift(&mut self) -> f64;

    /// Uniform in [0, 1); compared against the quote probability
    fn classify(&mut self) -> f64;

    /// Uniform in [0, 1); compared against the ask probability
    fn side(&mut self) -> f64;

    /// Size on one side of a quote, a multiple of BOOK_LOT
    fn book_size(&mut self) -> u32;

    fn trade_size(&mut self) -> u32;
}

/// `TickSource` backed by a random number generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible source: the same seed always yields the same draws
    pub fn seeded(seed: u64) -> Self {
        RngSource::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> TickSource for RngSource<R> {
    fn time_step_ns(&mut self) -> u64 {
        self.rng.gen_range(MIN_TIME_STEP_NS..=MAX_TIME_STEP_NS)
    }

    fn drift(&mut self) -> f64 {
        self.rng.gen_range(-MAX_DRIFT..=MAX_DRIFT)
    }

    fn classify(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn side(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn book_size(&mut self) -> u32 {
        self.rng.gen_range(MIN_BOOK_LOTS..=MAX_BOOK_LOTS) * BOOK_LOT
    }

    fn trade_size(&mut self) -> u32 {
        self.rng.gen_range(MIN_TRADE_SIZE..=MAX_TRADE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_within_bounds() {
        let mut source = RngSource::seeded(7);
        for _ in 0..10_000 {
            let dt = source.time_step_ns();
            assert!((MIN_TIME_STEP_NS..=MAX_TIME_STEP_NS).contains(&dt));

            let drift = source.drift();
            assert!(drift.abs() <= MAX_DRIFT);

            let u = source.classify();
            assert!((0.0..1.0).contains(&u));

            let size = source.book_size();
            assert_eq!(size % BOOK_LOT, 0);
            assert!((1_000..=10_000).contains(&size));

            let trade = source.trade_size();
            assert!((MIN_TRADE_SIZE..=MAX_TRADE_SIZE).contains(&trade));
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.time_step_ns(), b.time_step_ns());
            assert_eq!(a.drift(), b.drift());
            assert_eq!(a.book_size(), b.book_size());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = RngSource::seeded(1);
        let mut b = RngSource::seeded(2);
        let xs: Vec<u64> = (0..16).map(|_| a.time_step_ns()).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.time_step_ns()).collect();
        assert_ne!(xs, ys);
    }
}
