//! Shared application state for the taxoscope server.
//!
//! The taxonomy store is shared by the ingestion task (writer) and the HTTP
//! handlers (readers); both only see it through `TaxonomyStore`.

use std::sync::Arc;

use taxoscope_core::TaxonomyStore;

use crate::config::ServerConfig;
use crate::obs::ServerMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<TaxonomyStore>,
    metrics: Arc<ServerMetrics>,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        Self::with_store(cfg, Arc::new(TaxonomyStore::new()))
    }

    /// Build state around an existing store.
    pub fn with_store(cfg: ServerConfig, store: Arc<TaxonomyStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            store,
            metrics: Arc::new(ServerMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<TaxonomyStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Taxonomy gauges appended to the `/metrics` output.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        match self.store.summary() {
            Ok(s) => vec![
                ("taxoscope_origins", s.origins as u64),
                ("taxoscope_categories", s.categories as u64),
                ("taxoscope_tracked_metrics", s.metrics as u64),
            ],
            Err(e) => {
                tracing::error!(error = %e, "taxonomy summary unavailable");
                Vec::new()
            }
        }
    }
}
