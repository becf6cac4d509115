//! Price event representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price observation delivered by the upstream feed.
///
/// A quote carries both sides of the book, but bars are built from one
/// price per event. [`PriceEvent::from_quote`] picks the bid side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEvent {
    /// Timestamp of the event (UTC).
    pub time: DateTime<Utc>,
    /// Price used for bar construction.
    pub price: f64,
}

impl PriceEvent {
    /// Creates a new price event.
    #[must_use]
    pub const fn new(time: DateTime<Utc>, price: f64) -> Self {
        Self { time, price }
    }

    /// Creates a price event from a two-sided quote, keeping the bid.
    #[must_use]
    pub const fn from_quote(time: DateTime<Utc>, bid: f64, _ask: f64) -> Self {
        Self { time, price: bid }
    }

    /// Returns true if the price is a finite number.
    #[must_use]
    pub const fn has_finite_price(&self) -> bool {
        self.price.is_finite()
    }
}
