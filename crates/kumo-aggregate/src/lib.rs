//! Streaming price-to-bar aggregation for kumo.
//!
//! This crate turns a stream of [`PriceEvent`](kumo_types::PriceEvent)s into
//! fixed-interval candles:
//!
//! - [`Bar`] - Open/high/low/close bar data structure
//! - [`BarSeries`] - Ordered, append-only bar history
//! - [`BarAggregator`] - Streaming event aggregator

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kumo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;
mod error;
mod series;

pub use aggregator::{BarAggregator, IngestOutcome};
pub use bar::Bar;
pub use error::IngestError;
pub use series::BarSeries;
