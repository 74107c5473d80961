//! Taxonomy store shared between the ingest path and report queries.
//!
//! A single reader/writer lock guards the whole origin map. Ingest takes the
//! write lock for one observation; a snapshot clones the map under one read
//! lock, so every report sees a state between two whole ingests. Poisoning is
//! reported as `TaxoscopeError::Internal` instead of panicking.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{Result, TaxoscopeError};

use super::entry::{IngestOutcome, OriginTaxonomy};

fn poisoned() -> TaxoscopeError {
    TaxoscopeError::Internal("taxonomy store lock poisoned".into())
}

/// Origin -> taxonomy, origins kept in lexicographic order.
#[derive(Debug, Default)]
pub struct TaxonomyStore {
    origins: RwLock<BTreeMap<String, OriginTaxonomy>>,
}

impl TaxonomyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `(origin, metric_name)` event.
    pub fn ingest(&self, origin: &str, metric_name: &str) -> Result<IngestOutcome> {
        let mut origins = self.origins.write().map_err(|_| poisoned())?;

        if let Some(taxonomy) = origins.get_mut(origin) {
            return Ok(taxonomy.observe(metric_name));
        }

        let mut taxonomy = OriginTaxonomy::new();
        let outcome = taxonomy.observe(metric_name);
        origins.insert(origin.to_string(), taxonomy);
        Ok(outcome)
    }

    /// Consistent copy of the whole store.
    pub fn snapshot(&self) -> Result<TaxonomySnapshot> {
        let origins = self.origins.read().map_err(|_| poisoned())?;
        Ok(TaxonomySnapshot {
            origins: origins.clone(),
        })
    }

    /// Counters for the metrics endpoint, computed without cloning.
    pub fn summary(&self) -> Result<TaxonomySummary> {
        let origins = self.origins.read().map_err(|_| poisoned())?;
        Ok(TaxonomySummary {
            origins: origins.len(),
            categories: origins.values().map(OriginTaxonomy::len).sum(),
            metrics: origins.values().map(OriginTaxonomy::leaf_count).sum(),
        })
    }
}

/// Size of the taxonomy at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxonomySummary {
    pub origins: usize,
    pub categories: usize,
    /// Leaf metrics (see `CategoryEntry::leaf_count`).
    pub metrics: usize,
}

/// Immutable view of the store taken by `TaxonomyStore::snapshot`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomySnapshot {
    origins: BTreeMap<String, OriginTaxonomy>,
}

impl TaxonomySnapshot {
    /// Origins in lexicographic order.
    pub fn origins(&self) -> impl Iterator<Item = (&str, &OriginTaxonomy)> {
        self.origins.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, origin: &str) -> Option<&OriginTaxonomy> {
        self.origins.get(origin)
    }

    pub fn origin_count(&self) -> usize {
        self.origins.len()
    }

    pub fn category_count(&self) -> usize {
        self.origins.values().map(OriginTaxonomy::len).sum()
    }

    /// Leaf metrics tracked: 1 per category-only entry, one per subcategory otherwise.
    pub fn total_metrics(&self) -> usize {
        self.origins.values().map(OriginTaxonomy::leaf_count).sum()
    }
}

impl Serialize for TaxonomySnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TaxonomySnapshot", 2)?;
        s.serialize_field("total_metrics", &self.total_metrics())?;
        s.serialize_field("origins", &self.origins)?;
        s.end()
    }
}
