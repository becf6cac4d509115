//! Streaming event-to-bar aggregation.

use kumo_types::{Interval, PriceEvent};
use tracing::{debug, trace};

use crate::{Bar, BarSeries, IngestError};

/// What a successful [`BarAggregator::ingest`] did to the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A new trailing bar was appended at `index`.
    Opened {
        /// Position of the new bar.
        index: usize,
    },
    /// The trailing bar at `index` was updated in place.
    Updated {
        /// Position of the updated bar.
        index: usize,
    },
}

impl IngestOutcome {
    /// Returns the position of the bar that was touched.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Opened { index } | Self::Updated { index } => *index,
        }
    }

    /// Returns true if the event crossed a bucket boundary.
    #[must_use]
    pub const fn opened_bar(&self) -> bool {
        matches!(self, Self::Opened { .. })
    }
}

/// Streaming bar aggregator.
///
/// Owns the [`BarSeries`] and is its only writer. Events are expected in
/// non-decreasing time order; an event older than the trailing bar is
/// rejected and leaves the series untouched.
#[derive(Debug, Clone)]
pub struct BarAggregator {
    series: BarSeries,
}

impl BarAggregator {
    /// Creates a new aggregator with an empty series.
    #[must_use]
    pub const fn new(interval: Interval) -> Self {
        Self {
            series: BarSeries::new(interval),
        }
    }

    /// Creates an aggregator that continues from previously recorded bars.
    #[must_use]
    pub const fn with_history(series: BarSeries) -> Self {
        Self { series }
    }

    /// Returns the interval being aggregated to.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.series.interval()
    }

    /// Returns a read-only view of the series.
    #[must_use]
    pub const fn series(&self) -> &BarSeries {
        &self.series
    }

    /// Returns an owned copy of the series.
    #[must_use]
    pub fn snapshot(&self) -> BarSeries {
        self.series.clone()
    }

    /// Consumes the aggregator, returning the series.
    #[must_use]
    pub fn into_series(self) -> BarSeries {
        self.series
    }

    /// Folds an event into the series.
    ///
    /// The first event opens a bar at its own price. An event at or past the
    /// end of the trailing bucket opens a new bar whose open is the previous
    /// close. Anything else updates the trailing bar in place.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidPrice`] for non-finite prices and
    /// [`IngestError::OutOfOrder`] for events older than the trailing bar.
    pub fn ingest(&mut self, event: PriceEvent) -> Result<IngestOutcome, IngestError> {
        if !event.has_finite_price() {
            return Err(IngestError::InvalidPrice {
                time: event.time,
                price: event.price,
            });
        }

        let interval = self.series.interval();
        let index = self.series.len();

        let open = match self.series.last_mut() {
            None => event.price,
            Some(last) if event.time < last.start_time => {
                return Err(IngestError::OutOfOrder {
                    event_time: event.time,
                    bar_start: last.start_time,
                });
            }
            Some(last) if event.time >= last.start_time + interval.duration() => last.close,
            Some(last) => {
                last.update(event.price);
                trace!(index = index - 1, price = event.price, "updated bar");
                return Ok(IngestOutcome::Updated { index: index - 1 });
            }
        };

        let start_time = interval.truncate(event.time);
        self.series.push(Bar::opening(start_time, open, event.price));
        debug!(index, %start_time, open, price = event.price, "opened bar");

        Ok(IngestOutcome::Opened { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn event(offset_secs: i64, price: f64) -> PriceEvent {
        PriceEvent::new(base() + TimeDelta::seconds(offset_secs), price)
    }

    #[test]
    fn test_first_event_opens_at_its_price() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        let outcome = agg.ingest(event(17, 100.0)).unwrap();

        assert_eq!(outcome, IngestOutcome::Opened { index: 0 });
        let bar = agg.series().last().unwrap();
        assert_eq!(bar.start_time, base());
        assert!((bar.open - 100.0).abs() < 1e-10);
        assert!((bar.high - 100.0).abs() < 1e-10);
        assert!((bar.low - 100.0).abs() < 1e-10);
        assert!((bar.close - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_three_event_example() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        agg.ingest(event(0, 100.0)).unwrap();
        assert_eq!(
            agg.ingest(event(30, 105.0)).unwrap(),
            IngestOutcome::Updated { index: 0 }
        );
        assert_eq!(
            agg.ingest(event(61, 103.0)).unwrap(),
            IngestOutcome::Opened { index: 1 }
        );

        let bars = agg.series().bars();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0], Bar::new(base(), 100.0, 105.0, 100.0, 105.0, 2));
        assert_eq!(
            bars[1],
            Bar::new(base() + TimeDelta::minutes(1), 105.0, 105.0, 103.0, 103.0, 1)
        );
    }

    #[test]
    fn test_boundary_event_opens_new_bar() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        agg.ingest(event(59, 100.0)).unwrap();
        let outcome = agg.ingest(event(60, 101.0)).unwrap();
        assert!(outcome.opened_bar());
        assert_eq!(outcome.index(), 1);
    }

    #[test]
    fn test_gap_does_not_synthesize_bars() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        agg.ingest(event(0, 100.0)).unwrap();
        agg.ingest(event(10 * 60 + 5, 99.0)).unwrap();

        let series = agg.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[1].start_time, base() + TimeDelta::minutes(10));
        assert!((series.bars()[1].open - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_out_of_order_is_rejected_without_mutation() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        agg.ingest(event(0, 100.0)).unwrap();
        agg.ingest(event(65, 102.0)).unwrap();
        let before = agg.snapshot();

        let err = agg.ingest(event(30, 50.0)).unwrap_err();
        assert!(matches!(err, IngestError::OutOfOrder { .. }));
        assert_eq!(agg.snapshot(), before);
    }

    #[test]
    fn test_late_event_within_trailing_bucket_is_accepted() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        agg.ingest(event(0, 100.0)).unwrap();
        agg.ingest(event(40, 101.0)).unwrap();
        // Older than the previous event but still inside the trailing bucket.
        let outcome = agg.ingest(event(20, 99.0)).unwrap();
        assert_eq!(outcome, IngestOutcome::Updated { index: 0 });
        assert!((agg.series().bars()[0].close - 99.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        let err = agg.ingest(event(0, f64::NAN)).unwrap_err();
        assert!(matches!(err, IngestError::InvalidPrice { .. }));
        assert!(agg.series().is_empty());
    }

    #[test]
    fn test_bucket_count_and_invariants() {
        let mut agg = BarAggregator::new(Interval::Minute1);
        let prices = [100.0, 98.5, 103.2, 101.0, 97.7, 99.9, 104.4, 100.1, 96.3, 102.8];
        let mut buckets = std::collections::BTreeSet::new();

        for (i, price) in prices.iter().enumerate() {
            let offset = i as i64 * 37;
            buckets.insert(offset / 60);
            agg.ingest(event(offset, *price)).unwrap();
        }

        let series = agg.series();
        assert_eq!(series.len(), buckets.len());
        for bar in series {
            assert!(bar.low <= bar.open.min(bar.close));
            assert!(bar.open.max(bar.close) <= bar.high);
        }
        assert!(
            series
                .bars()
                .windows(2)
                .all(|w| w[0].start_time < w[1].start_time)
        );
    }

    #[test]
    fn test_with_history_continues_from_last_close() {
        let history = BarSeries::from_bars(
            Interval::Minute1,
            vec![Bar::new(base(), 100.0, 102.0, 99.0, 101.5, 12)],
        )
        .unwrap();
        let mut agg = BarAggregator::with_history(history);

        agg.ingest(event(45, 101.0)).unwrap();
        agg.ingest(event(75, 104.0)).unwrap();

        let bars = agg.into_series().into_bars();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].tick_count, 13);
        assert!((bars[1].open - 101.0).abs() < 1e-10);
    }
}
