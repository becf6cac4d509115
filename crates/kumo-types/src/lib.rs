//! Core types for the kumo live Ichimoku cloud pipeline.
//!
//! This crate provides the fundamental data structures used throughout kumo:
//!
//! - [`PriceEvent`] - A single price observation taken from the upstream feed
//! - [`Interval`] - Bar length used to bucket events into candles
//! - [`KumoError`] - Umbrella error type for kumo operations

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kumo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod event;
mod interval;

pub use error::{KumoError, Result};
pub use event::PriceEvent;
pub use interval::{Interval, IntervalParseError};
