//! CLI command implementations.

pub(crate) mod bars;
pub(crate) mod config;
pub(crate) mod replay;
