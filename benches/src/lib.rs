//! Synthetic price data for kumo benchmarks.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use kumo_lib::{BarAggregator, BarSeries, Interval, PriceEvent};

/// Fixed anchor so every run sees the same bucket boundaries.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Deterministic price path: a slow trend wave with a faster ripple.
///
/// Long enough swings produce several bullish and bearish cloud regions.
pub fn price_at(step: usize) -> f64 {
    let x = step as f64;
    100.0 + 8.0 * (x / 900.0).sin() + 1.5 * (x / 37.0).sin() + 0.25 * (x / 3.0).cos()
}

/// `count` events spaced `spacing` apart, starting at [`epoch`].
pub fn synthetic_events(count: usize, spacing: TimeDelta) -> Vec<PriceEvent> {
    (0..count)
        .map(|i| PriceEvent::new(epoch() + spacing * i as i32, price_at(i)))
        .collect()
}

/// A bar history of roughly `bars` bars, four events per bar.
pub fn synthetic_series(bars: usize, interval: Interval) -> BarSeries {
    let spacing = interval.duration() / 4;
    let mut aggregator = BarAggregator::new(interval);
    for event in synthetic_events(bars * 4, spacing) {
        aggregator
            .ingest(event)
            .expect("synthetic events are ordered with finite prices");
    }
    aggregator.into_series()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_series_shape() {
        let series = synthetic_series(120, Interval::Minute1);
        assert_eq!(series.len(), 120);
        assert!(series.iter().all(|bar| bar.tick_count == 4));
        assert!(series.iter().all(|bar| bar.is_consistent()));
    }

    #[test]
    fn test_prices_are_deterministic() {
        let a = synthetic_events(10, TimeDelta::seconds(1));
        let b = synthetic_events(10, TimeDelta::seconds(1));
        assert_eq!(a, b);
    }
}
