//! Aggregation error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while folding events into a bar series.
///
/// A rejected event never mutates the series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// The event predates the bar currently being built.
    #[error("Out-of-order event at {event_time}: last bar starts at {bar_start}")]
    OutOfOrder {
        /// Timestamp of the rejected event.
        event_time: DateTime<Utc>,
        /// Start of the trailing bar.
        bar_start: DateTime<Utc>,
    },

    /// The event carries a NaN or infinite price.
    #[error("Invalid price {price} at {time}")]
    InvalidPrice {
        /// Timestamp of the rejected event.
        time: DateTime<Utc>,
        /// The offending price.
        price: f64,
    },

    /// A seeded history bar breaks a series invariant.
    #[error("Invalid history bar at index {index}: {reason}")]
    InvalidHistory {
        /// Position of the offending bar.
        index: usize,
        /// Which invariant was broken.
        reason: String,
    },
}
