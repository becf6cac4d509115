//! Bar history shared between the event path and the redraw path.

use kumo_aggregate::{BarAggregator, BarSeries, IngestError, IngestOutcome};
use kumo_types::{Interval, PriceEvent};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Handle to a bar history shared between tasks.
///
/// [`ingest`](Self::ingest) is the only writer and holds the write lock for
/// the whole fold, so a [`snapshot`](Self::snapshot) never sees a bar with
/// some fields updated and others not. Clones share the same history.
#[derive(Debug, Clone)]
pub struct SharedBarSeries {
    aggregator: Arc<RwLock<BarAggregator>>,
}

impl SharedBarSeries {
    /// Creates an empty shared history.
    #[must_use]
    pub fn new(interval: Interval) -> Self {
        Self::from_aggregator(BarAggregator::new(interval))
    }

    /// Creates a shared history that continues from recorded bars.
    #[must_use]
    pub fn with_history(series: BarSeries) -> Self {
        Self::from_aggregator(BarAggregator::with_history(series))
    }

    fn from_aggregator(aggregator: BarAggregator) -> Self {
        Self {
            aggregator: Arc::new(RwLock::new(aggregator)),
        }
    }

    /// Folds an event into the history under the write lock.
    ///
    /// # Errors
    ///
    /// Propagates the aggregator's rejection; the history is unchanged.
    pub async fn ingest(&self, event: PriceEvent) -> Result<IngestOutcome, IngestError> {
        self.aggregator.write().await.ingest(event)
    }

    /// Returns an owned copy of the history taken under the read lock.
    pub async fn snapshot(&self) -> BarSeries {
        self.aggregator.read().await.snapshot()
    }

    /// Returns the number of bars.
    pub async fn len(&self) -> usize {
        self.aggregator.read().await.series().len()
    }

    /// Returns true if no bar exists yet.
    pub async fn is_empty(&self) -> bool {
        self.aggregator.read().await.series().is_empty()
    }

    /// Returns the bar interval.
    pub async fn interval(&self) -> Interval {
        self.aggregator.read().await.interval()
    }
}
