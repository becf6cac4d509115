//! Bars command implementation.

use crate::display::{Format, open_output, spinner};
use crate::source::open_events;
use anyhow::Result;
use futures::StreamExt;
use kumo_lib::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Aggregates an event file into bars and writes them out.
pub(crate) async fn bars(
    events: &Path,
    interval: Interval,
    output: Option<PathBuf>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let mut stream = open_events(events).await?;
    let mut aggregator = BarAggregator::new(interval);
    let mut rejected = 0u64;

    let progress = spinner(quiet)?;
    progress.set_message(format!("aggregating {interval} bars"));

    while let Some(event) = stream.next().await {
        if let Err(e) = aggregator.ingest(event) {
            warn!(error = %e, "dropping event");
            rejected += 1;
        }
        progress.inc(1);
    }

    let series = aggregator.into_series();
    progress.finish_with_message(format!(
        "{} bars ({rejected} events rejected)",
        series.len()
    ));
    info!(bars = series.len(), rejected, "aggregation finished");

    let mut writer = open_output(output.as_deref())?;
    OutputFormat::from(format).write_bars(series.bars(), &mut writer)?;
    writer.flush()?;

    if !quiet && let Some(path) = &output {
        eprintln!("Output written to: {}", path.display());
    }

    Ok(())
}
