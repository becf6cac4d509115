//! Ichimoku cloud recomputation for kumo.
//!
//! This crate derives the five Ichimoku lines from a bar history:
//!
//! - [`IchimokuParams`] - Window lengths and displacement
//! - [`IndicatorSet`] - Conversion, base, both leading spans and the lagging span
//! - [`compute`] - Pure recomputation from a bar slice
//! - [`rolling_max`] / [`rolling_min`] - Sliding window extrema

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kumo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ichimoku;
mod params;
mod rolling;

pub use ichimoku::{IndicatorSet, compute};
pub use params::{IchimokuParams, ParamsError};
pub use rolling::{rolling_max, rolling_midpoint, rolling_min};
