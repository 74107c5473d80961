//! Ingestion pipeline: source -> channel -> store.
//!
//! One task owns the receive side and applies envelopes strictly in arrival
//! order, so the store only ever has a single writer. Delivery errors are
//! logged by a separate task and never stop ingestion.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use taxoscope_core::error::{Result, TaxoscopeError};
use taxoscope_core::protocol::Envelope;
use taxoscope_core::{IngestOutcome, TaxonomyStore};

use crate::app_state::AppState;
use crate::obs::ServerMetrics;
use crate::source::{EnvelopeSource, Subscription};

/// Applies envelopes to the taxonomy store.
#[derive(Clone)]
pub struct Ingestor {
    store: Arc<TaxonomyStore>,
    metrics: Arc<ServerMetrics>,
}

impl Ingestor {
    pub fn new(store: Arc<TaxonomyStore>, metrics: Arc<ServerMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Apply one envelope. Returns `None` for envelopes that carry no value metric.
    pub fn apply(&self, env: &Envelope) -> Result<Option<IngestOutcome>> {
        self.metrics
            .envelopes
            .inc(&[("event_type", env.event_type.as_str())]);

        let Some(vm) = env.value_metric() else {
            return Ok(None);
        };

        let outcome = self.store.ingest(&env.origin, &vm.name)?;
        self.metrics
            .ingest_outcomes
            .inc(&[("outcome", outcome.as_str())]);

        if outcome.is_mutation() {
            tracing::debug!(origin = %env.origin, metric = %vm.name, outcome = outcome.as_str(), "taxonomy updated");
        }
        Ok(Some(outcome))
    }

    /// Consume envelopes until the channel closes. Returns the number of
    /// value metrics applied.
    pub async fn run(self, mut rx: mpsc::Receiver<Envelope>) -> Result<u64> {
        let mut applied = 0u64;
        while let Some(env) = rx.recv().await {
            if self.apply(&env)?.is_some() {
                applied += 1;
            }
        }
        Ok(applied)
    }
}

/// Log and count every delivery error until the channel closes.
pub async fn log_stream_errors(
    source: &'static str,
    mut rx: mpsc::Receiver<TaxoscopeError>,
    metrics: Arc<ServerMetrics>,
) {
    while let Some(e) = rx.recv().await {
        metrics.stream_errors.inc(&[("source", source)]);
        tracing::warn!(source, code = e.code().as_str(), error = %e, "stream error");
    }
}

/// Spawn source, error logger, and ingestor. The returned handle finishes
/// once the source has closed and every received envelope has been applied.
pub fn spawn_ingestion(state: &AppState, source: Box<dyn EnvelopeSource>) -> JoinHandle<()> {
    let capacity = state.cfg().source.channel_capacity;
    let subscription = Subscription::from_config(&state.cfg().source);
    let metrics = state.metrics();
    let ingestor = Ingestor::new(state.store(), state.metrics());

    let (env_tx, env_rx) = mpsc::channel::<Envelope>(capacity);
    let (err_tx, err_rx) = mpsc::channel::<TaxoscopeError>(capacity);

    let name = source.name();
    let errors = tokio::spawn(log_stream_errors(name, err_rx, Arc::clone(&metrics)));
    let ingest = tokio::spawn(ingestor.run(env_rx));

    tokio::spawn(async move {
        tracing::info!(source = name, subscription = %subscription.id, "stream starting");

        match source.stream(&subscription, env_tx, err_tx).await {
            Ok(lines) => tracing::info!(source = name, lines, "stream closed"),
            Err(e) => {
                metrics.stream_errors.inc(&[("source", name)]);
                tracing::error!(source = name, error = %e, "stream failed");
            }
        }

        match ingest.await {
            Ok(Ok(applied)) => tracing::info!(applied, "ingestion finished"),
            Ok(Err(e)) => tracing::error!(error = %e, "ingestion stopped"),
            Err(e) => tracing::error!(error = %e, "ingestion task aborted"),
        }
        let _ = errors.await;

        metrics.set_source_closed();
    })
}
