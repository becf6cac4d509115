//! Same-sign segmentation of the leading spans.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Which leading span dominates at an index.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Span A strictly above span B.
    #[display("bullish")]
    Bullish,
    /// Span A at or below span B.
    #[display("bearish")]
    Bearish,
}

impl Direction {
    /// Classifies one index. Equal spans are bearish.
    #[must_use]
    pub const fn classify(span_a: f64, span_b: f64) -> Self {
        if span_a > span_b {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }

    /// Returns the fill color used for regions of this direction.
    #[must_use]
    pub const fn fill_color(&self) -> &'static str {
        match self {
            Self::Bullish => "rgba(0, 250, 0, 0.4)",
            Self::Bearish => "rgba(255, 0, 0, 0.4)",
        }
    }
}

/// Maximal run of consecutive projected indices sharing one direction.
///
/// `end_index` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// First index of the run.
    pub start_index: usize,
    /// Last index of the run (inclusive).
    pub end_index: usize,
    /// Direction shared by every index in the run.
    pub direction: Direction,
}

impl Segment {
    /// Creates a segment covering a single index.
    #[must_use]
    pub const fn at(index: usize, direction: Direction) -> Self {
        Self {
            start_index: index,
            end_index: index,
            direction,
        }
    }

    /// Returns the number of indices covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Always false: a segment covers at least one index.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the covered indices.
    #[must_use]
    pub const fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// Splits two aligned spans into same-direction segments.
///
/// Only indices where both spans are defined take part. A new segment starts
/// when the direction flips or when the previous index was undefined, so every
/// segment is contiguous. Extra trailing entries in the longer span are
/// ignored. No defined index yields no segments.
#[must_use]
pub fn partition(span_a: &[Option<f64>], span_b: &[Option<f64>]) -> Vec<Segment> {
    span_a
        .iter()
        .zip(span_b)
        .enumerate()
        .filter_map(|(index, (a, b))| Some((index, Direction::classify((*a)?, (*b)?))))
        .fold(Vec::new(), |mut segments, (index, direction)| {
            match segments.last_mut() {
                Some(last) if last.direction == direction && last.end_index + 1 == index => {
                    last.end_index = index;
                }
                _ => segments.push(Segment::at(index, direction)),
            }
            segments
        })
}
