//! Render payload assembled on every pipeline run.

use chrono::{DateTime, Utc};
use kumo_aggregate::{Bar, BarSeries};
use kumo_cloud::{CloudPolygon, Direction, Segment, partition, polygons};
use kumo_indicator::{IchimokuParams, compute};
use kumo_types::Interval;
use serde::{Deserialize, Serialize};

/// A value keyed by the timestamp it is plotted at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Plot position on the time axis.
    pub time: DateTime<Utc>,
    /// Value at that position, absent while a window is not yet full.
    pub value: Option<f64>,
}

/// Everything a renderer needs to draw one frame.
///
/// Conversion, base and lagging lines are keyed by bar start times. The
/// leading spans are keyed by the projected timeline, which continues
/// `displacement` intervals past the last bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    /// Bar length of the snapshot.
    pub interval: Interval,
    /// Parameters the lines were computed with.
    pub params: IchimokuParams,
    /// Candles for display, oldest first.
    pub bars: Vec<Bar>,
    /// Conversion line at bar times.
    pub conversion_line: Vec<PlotPoint>,
    /// Base line at bar times.
    pub base_line: Vec<PlotPoint>,
    /// Lagging span at bar times.
    pub lagging_span: Vec<PlotPoint>,
    /// Leading span A at projected times.
    pub leading_span_a: Vec<PlotPoint>,
    /// Leading span B at projected times.
    pub leading_span_b: Vec<PlotPoint>,
    /// Same-direction cloud regions over the projected timeline.
    pub segments: Vec<Segment>,
    /// Fill boundary of each segment.
    pub polygons: Vec<CloudPolygon>,
}

impl RenderPayload {
    /// Recomputes the indicator and cloud regions from a snapshot.
    #[must_use]
    pub fn build(snapshot: BarSeries, params: &IchimokuParams) -> Self {
        let set = compute(snapshot.bars(), params);
        let raw_times = snapshot.start_times();
        let projected_times = projected_timeline(&snapshot, params.displacement);

        let segments = partition(&set.leading_span_a, &set.leading_span_b);
        let shapes = polygons(
            &segments,
            &projected_times,
            &set.leading_span_a,
            &set.leading_span_b,
        );

        Self {
            interval: snapshot.interval(),
            params: *params,
            conversion_line: plot(&raw_times, &set.conversion_line),
            base_line: plot(&raw_times, &set.base_line),
            lagging_span: plot(&raw_times, &set.lagging_span),
            leading_span_a: plot(&projected_times, &set.leading_span_a),
            leading_span_b: plot(&projected_times, &set.leading_span_b),
            segments,
            polygons: shapes,
            bars: snapshot.into_bars(),
        }
    }

    /// Returns true if no bar has been recorded yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the direction of the furthest projected cloud region.
    #[must_use]
    pub fn leading_direction(&self) -> Option<Direction> {
        self.segments.last().map(|segment| segment.direction)
    }
}

/// Bar start times followed by `displacement` synthesized future times, one
/// interval apart, after the last bar.
///
/// An empty series has no anchor for the future times and yields an empty
/// timeline.
#[must_use]
pub fn projected_timeline(series: &BarSeries, displacement: usize) -> Vec<DateTime<Utc>> {
    let Some(last) = series.last() else {
        return Vec::new();
    };

    let step = series.interval().duration();
    let future = std::iter::successors(Some(last.start_time + step), |time| Some(*time + step))
        .take(displacement);

    series.iter().map(|bar| bar.start_time).chain(future).collect()
}

fn plot(times: &[DateTime<Utc>], values: &[Option<f64>]) -> Vec<PlotPoint> {
    times
        .iter()
        .zip(values)
        .map(|(&time, &value)| PlotPoint { time, value })
        .collect()
}
