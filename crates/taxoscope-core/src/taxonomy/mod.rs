//! Per-origin metric taxonomy.
//!
//! - `entry`: category entries and the per-origin aggregation rules
//! - `store`: the lock-guarded origin map shared by ingest and query paths

pub mod entry;
pub mod store;

pub use entry::{CategoryEntry, IngestOutcome, OriginTaxonomy};
pub use store::{TaxonomySnapshot, TaxonomyStore, TaxonomySummary};
