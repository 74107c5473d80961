use async_trait::async_trait;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use taxoscope_core::error::{Result, TaxoscopeError};
use taxoscope_core::protocol::Envelope;

use super::{pump_lines, EnvelopeSource, Subscription};

/// Reads envelopes from standard input, e.g. a recorded stream piped in.
#[derive(Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnvelopeSource for StdinSource {
    fn name(&self) -> &'static str {
        "stdin"
    }

    async fn stream(
        &self,
        subscription: &Subscription,
        envelopes: mpsc::Sender<Envelope>,
        errors: mpsc::Sender<TaxoscopeError>,
    ) -> Result<u64> {
        tracing::info!(subscription = %subscription.id, "reading envelopes from stdin");
        pump_lines(BufReader::new(tokio::io::stdin()), &envelopes, &errors).await
    }
}
