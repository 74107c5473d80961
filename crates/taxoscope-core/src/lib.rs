//! taxoscope core: metric-name taxonomy model, aggregation, rendering, and the
//! telemetry envelope format.
//!
//! This crate holds everything that does not need a runtime or a transport:
//! the name parser, the per-origin taxonomy with its dedup/ordering rules, the
//! lock-guarded store shared between the ingest and query paths, and the
//! report renderer. The server crate wires these to a stream source and HTTP.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TaxoscopeError`/`Result` so a bad
//! envelope or a poisoned lock never takes the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod name;
pub mod protocol;
pub mod report;
pub mod taxonomy;

/// Shared result type.
pub use error::{Result, TaxoscopeError};
pub use name::parse_metric_name;
pub use taxonomy::{CategoryEntry, IngestOutcome, OriginTaxonomy, TaxonomySnapshot, TaxonomyStore, TaxonomySummary};
