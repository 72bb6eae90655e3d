/// Mid-price random walk with a fixed bid/ask spread
///
/// The walk owns the evolving mid price. Each step applies a drift drawn by the caller,
/// clamps the result into [MIN_MID, MAX_MID] and rounds it to cents. Bid and ask sit
/// half a spread either side of the mid, each rounded to cents.

use crate::protocol::{price_from_cents, price_to_cents, round_price};

pub const MIN_MID: f64 = 90.0;
pub const MAX_MID: f64 = 110.0;

/// Largest absolute drift applied in one step
pub const MAX_DRIFT: f64 = 0.01;

pub const DEFAULT_INITIAL_MID: f64 = 100.0;
pub const DEFAULT_SPREAD: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

/// Mid, bid and ask derived at a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopOfBook {
    pub mid: f64,
    pub bid: f64,
    pub ask: f64,
}

impl TopOfBook {
    pub fn price(&self, side: Side) -> f64 {
        match side {
            Side::Bid => self.bid,
            Side::Ask => self.ask,
        }
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

#[derive(Debug, Clone)]
pub struct PriceWalk {
    mid: f64,
    spread: f64,
}

impl PriceWalk {
    pub fn new(initial_mid: f64, spread: f64) -> Self {
        PriceWalk {
            mid: round_price(initial_mid.clamp(MIN_MID, MAX_MID)),
            spread,
        }
    }

    /// Apply one drift and return the resulting top of book
    pub fn step(&mut self, drift: f64) -> TopOfBook {
        // Clamp first so the stored bound is exact after rounding
        self.mid = round_price((self.mid + drift).clamp(MIN_MID, MAX_MID));
        self.quote()
    }

    /// Current top of book without moving the walk
    pub fn quote(&self) -> TopOfBook {
        let half = self.spread / 2.0;
        TopOfBook {
            mid: self.mid,
            bid: round_price(self.mid - half),
            ask: round_price(self.mid + half),
        }
    }

    pub fn mid(&self) -> f64 {
        self.mid
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }
}

/// True when `spread` leaves bid strictly below ask at every mid the walk can reach.
/// Spreads under about a cent round both sides onto the same price.
pub fn book_stays_open(spread: f64) -> bool {
    if !spread.is_finite() || spread <= 0.0 {
        return false;
    }
    (price_to_cents(MIN_MID)..=price_to_cents(MAX_MID)).all(|cents| {
        let book = PriceWalk::new(price_from_cents(cents), spread).quote();
        book.spread() > 0.0
    })
}

impl Default for PriceWalk {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_MID, DEFAULT_SPREAD)
    }
}
