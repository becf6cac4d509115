//! Live update pipeline for the kumo Ichimoku cloud.
//!
//! This crate wires the aggregator, indicator and partitioner together
//! behind two trigger sources, incoming events and a redraw timer:
//!
//! - [`SharedBarSeries`] - Bar history guarded for one writer and many readers
//! - [`LivePipeline`] - Recomputes a [`RenderPayload`] on every trigger
//! - [`RenderSink`] - Receives each payload
//! - [`LiveConfig`] - Pipeline configuration

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kumo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod payload;
mod pipeline;
mod shared;

pub use config::LiveConfig;
pub use payload::{PlotPoint, RenderPayload, projected_timeline};
pub use pipeline::{LiveError, LivePipeline, RenderSink, RunSummary, SinkError};
pub use shared::SharedBarSeries;
