//! Stream sources feeding envelopes into ingestion.
//!
//! A source is handed a subscription plus two channels, in the shape of a
//! firehose client: decoded envelopes go to one, delivery errors to the
//! other. Errors never end the stream on their own; a source returns when its
//! input closes or when nobody is receiving envelopes any more.

pub mod lines;
pub mod stdin;
pub mod tcp;

use async_trait::async_trait;
use tokio::sync::mpsc;

use taxoscope_core::error::{Result, TaxoscopeError};
use taxoscope_core::protocol::Envelope;

use crate::config::{SourceKind, SourceSection};

pub use lines::pump_lines;
pub use stdin::StdinSource;
pub use tcp::TcpSource;

/// Subscription identity presented to the stream endpoint.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: String,
    pub access_token: String,
}

impl Subscription {
    pub fn from_config(cfg: &SourceSection) -> Self {
        Self {
            id: cfg.subscription_id.clone(),
            access_token: cfg.access_token.clone(),
        }
    }
}

#[async_trait]
pub trait EnvelopeSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Stream until the input ends. Returns the number of lines decoded.
    async fn stream(
        &self,
        subscription: &Subscription,
        envelopes: mpsc::Sender<Envelope>,
        errors: mpsc::Sender<TaxoscopeError>,
    ) -> Result<u64>;
}

/// Build the source selected by config.
pub fn from_config(cfg: &SourceSection) -> Box<dyn EnvelopeSource> {
    match cfg.kind {
        SourceKind::Tcp => Box::new(TcpSource::new(cfg.address.clone())),
        SourceKind::Stdin => Box::new(StdinSource::new()),
    }
}
