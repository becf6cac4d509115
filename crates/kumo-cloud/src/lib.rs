//! Cloud region partitioning for kumo.
//!
//! Turns the two leading spans into alternating filled regions:
//!
//! - [`Direction`] - Bullish when span A is strictly above span B
//! - [`Segment`] - Maximal run of indices sharing a direction
//! - [`partition`] - Pure fold from two aligned spans to segments
//! - [`CloudPolygon`] - Closed boundary of one segment, ready to fill

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kumo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod partition;
mod polygon;

pub use partition::{Direction, Segment, partition};
pub use polygon::{CloudPolygon, polygons};
