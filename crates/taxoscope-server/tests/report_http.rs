//! HTTP contract of the report and ops endpoints.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use std::time::Instant;

use axum::response::IntoResponse;

use taxoscope_core::error::TaxoscopeError;
use taxoscope_server::app_state::AppState;
use taxoscope_server::config::{ServerConfig, SourceKind};
use taxoscope_server::error::ApiError;
use taxoscope_server::router::build_router;
use taxoscope_server::transport::http::observe_render;

fn test_state() -> AppState {
    let mut cfg = ServerConfig::default();
    cfg.source.kind = SourceKind::Stdin;
    AppState::new(cfg)
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Option<String>, String) {
    let resp = build_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn messages_renders_html_report() {
    let state = test_state();
    let store = state.store();
    store.ingest("a", "x").unwrap();
    store.ingest("b", "y.z").unwrap();

    let (status, content_type, body) = get(&state, "/messages").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("Total Number of Metrics: 2"));
    assert!(body.contains("<td>a</td>"));
    assert!(body.contains("<td>b</td>"));
}

#[tokio::test]
async fn messages_on_empty_store() {
    let (status, _, body) = get(&test_state(), "/messages").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Total Number of Metrics: 0"));
}

#[tokio::test]
async fn taxonomy_json_view() {
    let state = test_state();
    state.store().ingest("r", "foo.bar").unwrap();
    state.store().ingest("r", "foo.baz").unwrap();

    let (status, _, body) = get(&state, "/v1/taxonomy").await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["total_metrics"], 2);
    assert_eq!(v["origins"]["r"][0]["category"], "foo");
    assert_eq!(v["origins"]["r"][0]["subcategories"], serde_json::json!(["bar", "baz"]));
}

#[tokio::test]
async fn ops_endpoints() {
    let state = test_state();
    state.store().ingest("a", "x").unwrap();

    let (status, _, body) = get(&state, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _, _) = get(&state, "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    get(&state, "/messages").await;
    let (status, _, body) = get(&state, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("taxoscope_tracked_metrics 1"));
    assert!(body.contains("taxoscope_origins 1"));
    assert!(body.contains("taxoscope_render_duration_micros_count{format=\"html\"} 1"));
    assert!(body.contains("taxoscope_source_closed 0"));

    state.metrics().set_source_closed();
    let (status, _, _) = get(&state, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _, _) = get(&test_state(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn render_error_maps_to_500_json() {
    let resp = ApiError(TaxoscopeError::Render("bad template".into())).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["error"], "RENDER");
    assert!(v["message"].as_str().unwrap().contains("bad template"));
}

#[tokio::test]
async fn bad_request_maps_to_400() {
    let resp = ApiError(TaxoscopeError::BadRequest("junk".into())).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failed_render_is_counted_and_server_keeps_serving() {
    let state = test_state();
    state.store().ingest("a", "x").unwrap();

    let res: Result<String, TaxoscopeError> = Err(TaxoscopeError::Render("boom".into()));
    let err = observe_render(&state, "html", res, Instant::now()).expect_err("must stay an error");
    assert_eq!(err.code().as_str(), "RENDER");

    let metrics = state.metrics();
    assert_eq!(metrics.render_failures.get(&[("format", "html")]), 1);

    let (status, _, body) = get(&state, "/messages").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Total Number of Metrics: 1"));
    assert_eq!(metrics.render_failures.get(&[("format", "html")]), 1);

    let (_, _, body) = get(&state, "/metrics").await;
    assert!(body.contains("taxoscope_render_failures_total{format=\"html\"} 1"));
}
