//! Price bar (candlestick) data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open/high/low/close bar for one interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time (start of the interval bucket).
    pub start_time: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the interval.
    pub high: f64,
    /// Lowest price during the interval.
    pub low: f64,
    /// Last price seen during the interval.
    pub close: f64,
    /// Number of events folded into the bar.
    pub tick_count: u32,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        start_time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        tick_count: u32,
    ) -> Self {
        Self {
            start_time,
            open,
            high,
            low,
            close,
            tick_count,
        }
    }

    /// Opens a bar with an explicit open price and a first traded price.
    ///
    /// High and low cover both prices so the bar is consistent from the start.
    pub(crate) fn opening(start_time: DateTime<Utc>, open: f64, price: f64) -> Self {
        Self {
            start_time,
            open,
            high: open.max(price),
            low: open.min(price),
            close: price,
            tick_count: 1,
        }
    }

    /// Folds another price into the bar. The open is never touched.
    pub(crate) fn update(&mut self, price: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.tick_count = self.tick_count.saturating_add(1);
    }

    /// Returns true if open and close both lie within `[low, high]`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_range_and_body() {
        let bar = Bar::new(start(), 100.0, 105.0, 98.0, 103.0, 4);
        assert!((bar.range() - 7.0).abs() < 1e-10);
        assert!((bar.body() - 3.0).abs() < 1e-10);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_opening_widens_to_inherited_open() {
        let bar = Bar::opening(start(), 105.0, 103.0);
        assert!((bar.open - 105.0).abs() < 1e-10);
        assert!((bar.high - 105.0).abs() < 1e-10);
        assert!((bar.low - 103.0).abs() < 1e-10);
        assert!((bar.close - 103.0).abs() < 1e-10);
        assert!(bar.is_consistent());
        assert!(bar.is_bearish());
    }

    #[test]
    fn test_update_keeps_open() {
        let mut bar = Bar::opening(start(), 100.0, 100.0);
        bar.update(95.0);
        bar.update(110.0);
        bar.update(101.0);

        assert!((bar.open - 100.0).abs() < 1e-10);
        assert!((bar.high - 110.0).abs() < 1e-10);
        assert!((bar.low - 95.0).abs() < 1e-10);
        assert!((bar.close - 101.0).abs() < 1e-10);
        assert_eq!(bar.tick_count, 4);
    }

    #[test]
    fn test_inconsistent_bar() {
        let bar = Bar::new(start(), 120.0, 110.0, 100.0, 105.0, 1);
        assert!(!bar.is_consistent());
    }
}
