//! Fill boundaries for cloud segments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Direction, Segment};

/// Closed boundary of one cloud segment.
///
/// `points` walks span A forward over the segment, then span B backward, so
/// the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudPolygon {
    /// Direction of the underlying segment.
    pub direction: Direction,
    /// Fill color for the region.
    pub fill_color: String,
    /// Boundary vertices as `(time, value)` pairs.
    pub points: Vec<(DateTime<Utc>, f64)>,
}

impl CloudPolygon {
    /// Builds the boundary of `segment` from the projected timeline and spans.
    ///
    /// Returns `None` if the segment reaches past the timeline or covers an
    /// index where either span is undefined.
    #[must_use]
    pub fn from_segment(
        segment: &Segment,
        timeline: &[DateTime<Utc>],
        span_a: &[Option<f64>],
        span_b: &[Option<f64>],
    ) -> Option<Self> {
        let edge = |span: &[Option<f64>]| -> Option<Vec<(DateTime<Utc>, f64)>> {
            segment
                .indices()
                .map(|i| Some((*timeline.get(i)?, (*span.get(i)?)?)))
                .collect()
        };

        let mut points = edge(span_a)?;
        let lower = edge(span_b)?;
        points.extend(lower.into_iter().rev());

        Some(Self {
            direction: segment.direction,
            fill_color: segment.direction.fill_color().to_string(),
            points,
        })
    }
}

/// Builds one polygon per segment, skipping segments that cannot be resolved.
#[must_use]
pub fn polygons(
    segments: &[Segment],
    timeline: &[DateTime<Utc>],
    span_a: &[Option<f64>],
    span_b: &[Option<f64>],
) -> Vec<CloudPolygon> {
    segments
        .iter()
        .filter_map(|segment| CloudPolygon::from_segment(segment, timeline, span_a, span_b))
        .collect()
}
