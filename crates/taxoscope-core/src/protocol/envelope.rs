//! Telemetry envelope (JSON, one per line).
//!
//! Only the fields ingestion looks at are modelled; anything else on the wire
//! is ignored so producers can carry extra metadata.

use serde::Deserialize;

use crate::error::{Result, TaxoscopeError};

/// Kind of event carried by an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventType {
    HttpStartStop,
    LogMessage,
    ValueMetric,
    CounterEvent,
    Error,
    ContainerMetric,
    #[serde(other)]
    Unknown,
}

impl EventType {
    /// Label used for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::HttpStartStop => "http_start_stop",
            EventType::LogMessage => "log_message",
            EventType::ValueMetric => "value_metric",
            EventType::CounterEvent => "counter_event",
            EventType::Error => "error",
            EventType::ContainerMetric => "container_metric",
            EventType::Unknown => "unknown",
        }
    }
}

/// Value metric payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueMetric {
    /// Dotted hierarchical metric name.
    pub name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

/// Telemetry envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Component that emitted the event.
    pub origin: String,
    pub event_type: EventType,
    /// Nanoseconds since the epoch, when the producer sets it.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub deployment: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub value_metric: Option<ValueMetric>,
}

impl Envelope {
    /// The value metric, if this is a value metric envelope carrying one.
    pub fn value_metric(&self) -> Option<&ValueMetric> {
        match self.event_type {
            EventType::ValueMetric => self.value_metric.as_ref(),
            _ => None,
        }
    }
}

/// Decode one envelope from a JSON line.
pub fn decode_envelope(line: &str) -> Result<Envelope> {
    serde_json::from_str(line)
        .map_err(|e| TaxoscopeError::BadRequest(format!("invalid envelope json: {e}")))
}
