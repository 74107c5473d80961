//! taxoscope server library entry.
//!
//! This crate wires a stream source, the ingestion pipeline, and the HTTP
//! report endpoints around the core taxonomy store. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod ingest;
pub mod obs;
pub mod ops;
pub mod router;
pub mod source;
pub mod transport;
