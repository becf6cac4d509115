//! Live Ichimoku cloud computation from streaming price events.
//!
//! This is a facade crate that re-exports functionality from the kumo
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use kumo_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = LivePipeline::new(&LiveConfig::default())?;
//!
//!     pipeline.on_event(PriceEvent::new(chrono::Utc::now(), 101.5)).await;
//!     let payload = pipeline.refresh().await;
//!     println!("{} bars, cloud {:?}", payload.bars.len(), payload.leading_direction());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kumo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use kumo_types::*;

// Re-export aggregation
pub use kumo_aggregate::{Bar, BarAggregator, BarSeries, IngestError, IngestOutcome};

// Re-export indicator math
pub use kumo_indicator::{
    IchimokuParams, IndicatorSet, ParamsError, compute, rolling_max, rolling_midpoint, rolling_min,
};

// Re-export cloud partitioning
pub use kumo_cloud::{CloudPolygon, Direction, Segment, partition, polygons};

// Re-export the live pipeline
#[cfg(feature = "live")]
pub use kumo_live::{
    LiveConfig, LiveError, LivePipeline, PlotPoint, RenderPayload, RenderSink, RunSummary,
    SharedBarSeries, SinkError, projected_timeline,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use kumo_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

/// Prelude module for convenient imports.
///
/// ```
/// use kumo_lib::prelude::*;
/// ```
pub mod prelude {
    pub use kumo_types::{Interval, KumoError, PriceEvent, Result};

    pub use kumo_aggregate::{Bar, BarAggregator, BarSeries};

    pub use kumo_indicator::{IchimokuParams, IndicatorSet, compute};

    pub use kumo_cloud::{Direction, Segment, partition};

    #[cfg(feature = "live")]
    pub use kumo_live::{LiveConfig, LivePipeline, RenderPayload, RenderSink};

    #[cfg(feature = "format")]
    pub use kumo_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
