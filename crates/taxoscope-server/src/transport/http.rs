//! Report handlers (query path).
//!
//! Each request takes one snapshot of the store and renders from it; the store
//! is never touched while rendering. A render failure is logged and answered
//! with a 500 for that request only.

use std::time::Instant;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};

use taxoscope_core::report::{render_html, Report};
use taxoscope_core::{Result, TaxonomySnapshot};

use crate::app_state::AppState;
use crate::error::ApiError;

/// Record render timing; log and count a failure.
pub fn observe_render<T>(state: &AppState, format: &str, res: Result<T>, started: Instant) -> Result<T> {
    let metrics = state.metrics();
    metrics.render_duration.observe(&[("format", format)], started.elapsed());
    if let Err(e) = &res {
        metrics.render_failures.inc(&[("format", format)]);
        tracing::error!(format, error = %e, "report render failed");
    }
    res
}

fn html_report(snapshot: &TaxonomySnapshot) -> Result<String> {
    render_html(&Report::from_snapshot(snapshot))
}

/// `GET /messages`: the taxonomy as an HTML table.
pub async fn messages(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let res = state.store().snapshot().and_then(|snap| html_report(&snap));

    match observe_render(&state, "html", res, started) {
        Ok(body) => Html(body).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// `GET /v1/taxonomy`: the taxonomy snapshot as JSON.
pub async fn taxonomy(State(state): State<AppState>) -> std::result::Result<Json<TaxonomySnapshot>, ApiError> {
    let started = Instant::now();
    let snapshot = observe_render(&state, "json", state.store().snapshot(), started)?;
    Ok(Json(snapshot))
}
