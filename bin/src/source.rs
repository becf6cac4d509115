//! Event and history files read by the CLI.

use anyhow::{Context, Result, bail};
use csv_async::{AsyncReaderBuilder, Trim};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use kumo_lib::prelude::*;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Layout of an event file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceFormat {
    /// Header row `time,price`, RFC 3339 times.
    Csv,
    /// One `{"time": ..., "price": ...}` object per line.
    Ndjson,
}

impl SourceFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("ndjson" | "jsonl" | "json") => Ok(Self::Ndjson),
            _ => bail!(
                "Cannot infer event format of {}. Use a .csv or .ndjson file",
                path.display()
            ),
        }
    }
}

/// Opens an event file as a stream.
///
/// Malformed rows are logged and skipped; the stream ends at end of file.
pub(crate) async fn open_events(path: &Path) -> Result<BoxStream<'static, PriceEvent>> {
    let format = SourceFormat::from_path(path)?;
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Cannot open event file: {}", path.display()))?;
    debug!(path = %path.display(), ?format, "reading events");

    let events = match format {
        SourceFormat::Csv => AsyncReaderBuilder::new()
            .trim(Trim::All)
            .create_deserializer(file)
            .into_deserialize::<PriceEvent>()
            .enumerate()
            .filter_map(|(row, record)| async move {
                match record {
                    Ok(event) => Some(event),
                    Err(e) => {
                        warn!(row = row + 1, error = %e, "skipping malformed event");
                        None
                    }
                }
            })
            .boxed(),
        SourceFormat::Ndjson => {
            let lines = stream::unfold(BufReader::new(file).lines(), |mut lines| async move {
                match lines.next_line().await {
                    Ok(line) => line.map(|line| (line, lines)),
                    Err(e) => {
                        warn!(error = %e, "stopped reading events");
                        None
                    }
                }
            });

            lines
                .enumerate()
                .filter_map(|(row, line)| async move {
                    let line = line.trim();
                    if line.is_empty() {
                        return None;
                    }
                    serde_json::from_str::<PriceEvent>(line)
                        .map_err(|e| warn!(row = row + 1, error = %e, "skipping malformed event"))
                        .ok()
                })
                .boxed()
        }
    };

    Ok(events)
}

/// Loads recorded bars to seed a pipeline.
pub(crate) fn load_history(path: &Path, interval: Interval) -> Result<BarSeries> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read history file: {}", path.display()))?;
    let bars: Vec<Bar> = serde_json::from_str(&content)
        .with_context(|| format!("History must be a JSON array of bars: {}", path.display()))?;

    BarSeries::from_bars(interval, bars)
        .with_context(|| format!("History does not fit {interval} bars: {}", path.display()))
}
