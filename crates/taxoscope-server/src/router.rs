//! Axum router wiring.
//!
//! `/messages` serves the HTML report; the rest are JSON and ops endpoints.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/messages", get(transport::http::messages))
        .route("/v1/taxonomy", get(transport::http::taxonomy))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
