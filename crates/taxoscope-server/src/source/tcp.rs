use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use taxoscope_core::error::{Result, TaxoscopeError};
use taxoscope_core::protocol::Envelope;

use super::{pump_lines, EnvelopeSource, Subscription};

/// Subscribes to a TCP stream endpoint.
///
/// On connect the source writes one JSON line
/// `{"subscription_id": .., "access_token": ..}` and then reads
/// newline-delimited envelopes until the peer closes.
#[derive(Debug, Clone)]
pub struct TcpSource {
    address: String,
}

impl TcpSource {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

fn subscribe_line(subscription: &Subscription) -> String {
    let mut line = json!({
        "subscription_id": subscription.id,
        "access_token": subscription.access_token,
    })
    .to_string();
    line.push('\n');
    line
}

#[async_trait]
impl EnvelopeSource for TcpSource {
    fn name(&self) -> &'static str {
        "tcp"
    }

    async fn stream(
        &self,
        subscription: &Subscription,
        envelopes: mpsc::Sender<Envelope>,
        errors: mpsc::Sender<TaxoscopeError>,
    ) -> Result<u64> {
        let mut stream = TcpStream::connect(&self.address).await.map_err(|e| {
            TaxoscopeError::Source(format!("connect {} failed: {e}", self.address))
        })?;

        stream
            .write_all(subscribe_line(subscription).as_bytes())
            .await
            .map_err(|e| TaxoscopeError::Source(format!("subscribe failed: {e}")))?;

        tracing::info!(address = %self.address, subscription = %subscription.id, "subscribed to stream");

        let (read_half, _write_half) = stream.into_split();
        pump_lines(BufReader::new(read_half), &envelopes, &errors).await
    }
}
