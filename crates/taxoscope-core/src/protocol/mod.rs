//! Wire formats consumed from stream sources.
//!
//! Sources deliver newline-delimited JSON envelopes. Decoding is panic-free:
//! malformed input is reported as `TaxoscopeError` so one bad line never stops
//! the stream.

pub mod envelope;

pub use envelope::{decode_envelope, Envelope, EventType, ValueMetric};
