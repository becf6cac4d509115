//! Replay command implementation.
//!
//! Feeds an event file through the live pipeline, standing in for a market
//! data subscription, and writes the render payloads a chart would receive.

use crate::commands::config::ConfigArgs;
use crate::display::{Format, describe, open_output, spinner};
use crate::source::{load_history, open_events};
use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use indicatif::ProgressBar;
use kumo_lib::prelude::*;
use kumo_lib::{SharedBarSeries, SinkError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Arguments of the `replay` command.
#[derive(Debug)]
pub(crate) struct ReplayOptions {
    pub(crate) events: PathBuf,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: Format,
    pub(crate) history: Option<PathBuf>,
    pub(crate) every: bool,
    pub(crate) pace_ms: u64,
    pub(crate) settings: ConfigArgs,
    pub(crate) quiet: bool,
}

/// Sink writing payloads to the output, either each one or only the last.
struct PayloadWriter {
    writer: Box<dyn Write + Send>,
    format: OutputFormat,
    every: bool,
    latest: Option<RenderPayload>,
    progress: ProgressBar,
}

impl PayloadWriter {
    fn finish(mut self) -> Result<()> {
        if let Some(payload) = self.latest.take() {
            self.format.write_payload(&payload, &mut self.writer)?;
        }
        self.writer.flush()?;
        self.progress.finish();
        Ok(())
    }
}

#[async_trait]
impl RenderSink for PayloadWriter {
    async fn render(&mut self, payload: RenderPayload) -> Result<(), SinkError> {
        self.progress.inc(1);
        self.progress.set_message(describe(&payload));

        if self.every {
            self.format.write_payload(&payload, &mut self.writer)?;
        } else {
            self.latest = Some(payload);
        }
        Ok(())
    }
}

/// Replays events through a [`LivePipeline`].
pub(crate) async fn replay(options: ReplayOptions) -> Result<()> {
    let config = options.settings.resolve()?;

    let series = match &options.history {
        Some(path) => SharedBarSeries::with_history(load_history(path, config.interval)?),
        None => SharedBarSeries::new(config.interval),
    };
    let pipeline = LivePipeline::with_series(series, &config)?;

    let events = open_events(&options.events).await?;
    let events = if options.pace_ms > 0 {
        let pace = Duration::from_millis(options.pace_ms);
        events
            .then(move |event| async move {
                tokio::time::sleep(pace).await;
                event
            })
            .boxed()
    } else {
        events
    };

    let mut sink = PayloadWriter {
        writer: open_output(options.output.as_deref())?,
        format: options.format.into(),
        every: options.every,
        latest: None,
        progress: spinner(options.quiet)?,
    };

    let summary = pipeline.run(events, &mut sink).await?;
    sink.finish()?;

    info!(
        accepted = summary.events_accepted,
        rejected = summary.events_rejected,
        bars_opened = summary.bars_opened,
        renders = summary.renders,
        "replay finished"
    );

    if !options.quiet {
        eprintln!(
            "Replayed {} events ({} rejected), {} payloads rendered",
            summary.events_accepted + summary.events_rejected,
            summary.events_rejected,
            summary.renders
        );
        if let Some(path) = &options.output {
            eprintln!("Output written to: {}", path.display());
        }
    }

    Ok(())
}
