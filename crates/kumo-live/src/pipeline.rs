//! Trigger-driven recomputation loop.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use kumo_aggregate::{BarSeries, IngestOutcome};
use kumo_indicator::{IchimokuParams, ParamsError};
use kumo_types::PriceEvent;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, trace, warn};

use crate::{LiveConfig, RenderPayload, SharedBarSeries};

/// Boxed error returned by a [`RenderSink`].
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the pipeline.
///
/// Rejected events are not errors: they are logged and counted in the
/// [`RunSummary`].
#[derive(Error, Debug)]
pub enum LiveError {
    /// Indicator parameters are unusable.
    #[error("Invalid indicator parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    /// Redraw period of zero.
    #[error("Redraw interval must be > 0")]
    ZeroRedrawInterval,

    /// The rendering collaborator failed.
    #[error("Render sink failed: {0}")]
    Sink(#[source] SinkError),
}

/// Receiver of render payloads.
#[async_trait]
pub trait RenderSink: Send {
    /// Handles one freshly computed payload.
    ///
    /// # Errors
    ///
    /// Any error stops [`LivePipeline::run`].
    async fn render(&mut self, payload: RenderPayload) -> Result<(), SinkError>;
}

#[async_trait]
impl RenderSink for mpsc::Sender<RenderPayload> {
    async fn render(&mut self, payload: RenderPayload) -> Result<(), SinkError> {
        self.send(payload).await.map_err(|e| Box::new(e) as SinkError)
    }
}

/// Counters reported when [`LivePipeline::run`] finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Events folded into the history.
    pub events_accepted: u64,
    /// Events dropped as out-of-order or invalid.
    pub events_rejected: u64,
    /// Bars opened during the run.
    pub bars_opened: u64,
    /// Redraw timer ticks handled.
    pub redraws: u64,
    /// Payloads delivered to the sink.
    pub renders: u64,
}

/// Keeps a render payload current over a live event stream.
///
/// Each trigger takes a snapshot of the shared history, recomputes the
/// indicator and cloud regions from scratch, and hands the payload to a
/// [`RenderSink`]. Nothing is carried between runs except the history.
#[derive(Debug, Clone)]
pub struct LivePipeline {
    series: SharedBarSeries,
    params: IchimokuParams,
    redraw_interval: Duration,
}

impl LivePipeline {
    /// Creates a pipeline over an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters or redraw period are invalid.
    pub fn new(config: &LiveConfig) -> Result<Self, LiveError> {
        Self::with_series(SharedBarSeries::new(config.interval), config)
    }

    /// Creates a pipeline over an existing shared history.
    ///
    /// The history's own interval wins over `config.interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters or redraw period are invalid.
    pub fn with_series(series: SharedBarSeries, config: &LiveConfig) -> Result<Self, LiveError> {
        config.params.validate()?;
        if config.redraw_interval().is_zero() {
            return Err(LiveError::ZeroRedrawInterval);
        }

        Ok(Self {
            series,
            params: config.params,
            redraw_interval: config.redraw_interval(),
        })
    }

    /// Returns the shared history, e.g. to hand a writer to another task.
    #[must_use]
    pub const fn series(&self) -> &SharedBarSeries {
        &self.series
    }

    /// Returns the indicator parameters.
    #[must_use]
    pub const fn params(&self) -> &IchimokuParams {
        &self.params
    }

    /// Returns a consistent copy of the history.
    pub async fn snapshot(&self) -> BarSeries {
        self.series.snapshot().await
    }

    /// Folds one event into the history.
    ///
    /// Rejected events are logged at `warn` and dropped; the history is left
    /// unchanged and `None` is returned.
    pub async fn on_event(&self, event: PriceEvent) -> Option<IngestOutcome> {
        match self.series.ingest(event).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "dropping event");
                None
            }
        }
    }

    /// Builds a payload from the current history.
    pub async fn refresh(&self) -> RenderPayload {
        let snapshot = self.series.snapshot().await;
        let payload = RenderPayload::build(snapshot, &self.params);
        trace!(
            bars = payload.bars.len(),
            segments = payload.segments.len(),
            "refreshed payload"
        );
        payload
    }

    /// Drives the pipeline until `events` ends.
    ///
    /// Every accepted event and every redraw tick produces one payload for
    /// `sink`. A final payload is rendered once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Sink`] as soon as the sink fails.
    pub async fn run<S, R>(&self, events: S, sink: &mut R) -> Result<RunSummary, LiveError>
    where
        S: Stream<Item = PriceEvent> + Send,
        R: RenderSink + ?Sized,
    {
        let mut events = std::pin::pin!(events);
        let mut redraw = interval_at(Instant::now() + self.redraw_interval, self.redraw_interval);
        redraw.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut summary = RunSummary::default();
        info!(params = %self.params, redraw = ?self.redraw_interval, "pipeline started");

        loop {
            tokio::select! {
                next = events.next() => {
                    let Some(event) = next else { break };
                    match self.on_event(event).await {
                        Some(outcome) => {
                            summary.events_accepted += 1;
                            if outcome.opened_bar() {
                                summary.bars_opened += 1;
                            }
                        }
                        None => {
                            summary.events_rejected += 1;
                            continue;
                        }
                    }
                }
                _ = redraw.tick() => {
                    summary.redraws += 1;
                }
            }

            self.deliver(sink, &mut summary).await?;
        }

        self.deliver(sink, &mut summary).await?;
        debug!(?summary, "pipeline finished");

        Ok(summary)
    }

    async fn deliver<R>(&self, sink: &mut R, summary: &mut RunSummary) -> Result<(), LiveError>
    where
        R: RenderSink + ?Sized,
    {
        let payload = self.refresh().await;
        sink.render(payload).await.map_err(LiveError::Sink)?;
        summary.renders += 1;
        Ok(())
    }
}
