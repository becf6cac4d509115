//! Ordered bar history.

use chrono::{DateTime, Utc};
use kumo_types::Interval;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Bar, IngestError};

/// Ordered sequence of bars with strictly increasing, interval-aligned start
/// times.
///
/// Silent intervals leave gaps in wall-clock time; no filler bars are
/// synthesized. Only the last bar may change, and only through
/// [`BarAggregator`](crate::BarAggregator). Deserialization goes through
/// [`BarSeries::from_bars`], so a decoded series holds the same invariants.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BarSeries {
    interval: Interval,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Creates an empty series for the given interval.
    #[must_use]
    pub const fn new(interval: Interval) -> Self {
        Self {
            interval,
            bars: Vec::new(),
        }
    }

    /// Builds a series from previously recorded bars.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidHistory`] if a bar is misaligned, not
    /// strictly after its predecessor, or has open/close outside its range.
    pub fn from_bars(interval: Interval, bars: Vec<Bar>) -> Result<Self, IngestError> {
        for (index, bar) in bars.iter().enumerate() {
            if !interval.is_aligned(bar.start_time) {
                return Err(IngestError::InvalidHistory {
                    index,
                    reason: format!("start {} is not aligned to {interval}", bar.start_time),
                });
            }
            if !bar.is_consistent() {
                return Err(IngestError::InvalidHistory {
                    index,
                    reason: "open/close outside of low/high".to_string(),
                });
            }
            if index > 0 && bars[index - 1].start_time >= bar.start_time {
                return Err(IngestError::InvalidHistory {
                    index,
                    reason: "start time does not increase".to_string(),
                });
            }
        }

        Ok(Self { interval, bars })
    }

    /// Returns the interval the series is bucketed by.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the bars as a slice, oldest first.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Returns the number of bars.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if no bar has been created yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the trailing bar, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Returns an iterator over the bars, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// Returns the start times of all bars.
    #[must_use]
    pub fn start_times(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|bar| bar.start_time).collect()
    }

    /// Consumes the series and returns its bars.
    #[must_use]
    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }

    pub(crate) fn push(&mut self, bar: Bar) {
        self.bars.push(bar);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Bar> {
        self.bars.last_mut()
    }
}

impl<'de> Deserialize<'de> for BarSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Recorded {
            interval: Interval,
            bars: Vec<Bar>,
        }

        let recorded = Recorded::deserialize(deserializer)?;
        Self::from_bars(recorded.interval, recorded.bars).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a BarSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
