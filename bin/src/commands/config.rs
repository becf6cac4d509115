//! Pipeline settings shared by `replay` and `config`.

use anyhow::{Context, Result};
use clap::Args;
use kumo_lib::prelude::*;
use std::path::PathBuf;

/// Pipeline settings: an optional JSON file overridden by individual flags.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ConfigArgs {
    /// JSON configuration file
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Bar interval (s1, m1, m5, m15, m30, h1, h4, d1)
    #[arg(short, long)]
    pub(crate) interval: Option<Interval>,

    /// Conversion line window
    #[arg(long)]
    pub(crate) conversion: Option<usize>,

    /// Base line window
    #[arg(long)]
    pub(crate) base: Option<usize>,

    /// Leading span B window
    #[arg(long)]
    pub(crate) span_b: Option<usize>,

    /// Forward shift of the leading spans, backward shift of the lagging span
    #[arg(long)]
    pub(crate) displacement: Option<usize>,

    /// Redraw period in milliseconds
    #[arg(long)]
    pub(crate) redraw_ms: Option<u64>,
}

impl ConfigArgs {
    /// Builds the effective configuration.
    pub(crate) fn resolve(&self) -> Result<LiveConfig> {
        let mut config = match &self.config {
            Some(path) => LiveConfig::from_json_file(path)
                .with_context(|| format!("Invalid config file: {}", path.display()))?,
            None => LiveConfig::default(),
        };

        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        if let Some(window) = self.conversion {
            config.params.conversion_window = window;
        }
        if let Some(window) = self.base {
            config.params.base_window = window;
        }
        if let Some(window) = self.span_b {
            config.params.span_b_window = window;
        }
        if let Some(displacement) = self.displacement {
            config.params.displacement = displacement;
        }
        if let Some(redraw_ms) = self.redraw_ms {
            config.redraw_interval_ms = redraw_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Prints the effective configuration.
pub(crate) fn show_config(settings: &ConfigArgs) -> Result<()> {
    let config = settings.resolve()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
