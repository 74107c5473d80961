//! Report row model and HTML rendering.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use taxoscope_core::report::{render_html, OriginCell, Report, SubcategoryCell};
use taxoscope_core::TaxonomyStore;

fn sample_store() -> TaxonomyStore {
    let store = TaxonomyStore::new();
    store.ingest("router", "latency").unwrap();
    store.ingest("router", "requests.app.total").unwrap();
    store.ingest("router", "requests.bad").unwrap();
    store.ingest("doppler", "memoryStats.numFrees").unwrap();
    store
}

#[test]
fn rows_follow_origin_then_first_seen_category() {
    let report = Report::from_snapshot(&sample_store().snapshot().unwrap());

    assert_eq!(report.total_metrics, 4);
    assert_eq!(report.rows.len(), 3);

    assert_eq!(
        report.rows[0].origin,
        Some(OriginCell { name: "doppler".into(), row_span: 1 })
    );
    assert_eq!(report.rows[0].category, "memoryStats");

    assert_eq!(
        report.rows[1].origin,
        Some(OriginCell { name: "router".into(), row_span: 2 })
    );
    assert_eq!(report.rows[1].category, "latency");
    assert!(report.rows[1].subcategories.is_none());

    assert!(report.rows[2].origin.is_none());
    assert_eq!(report.rows[2].category, "requests");
    assert_eq!(
        report.rows[2].subcategories.as_deref().unwrap(),
        &[
            SubcategoryCell { segment: "app".into(), remainder: "total".into() },
            SubcategoryCell { segment: "bad".into(), remainder: String::new() },
        ]
    );
}

#[test]
fn empty_store_renders_zero_total() {
    let report = Report::from_snapshot(&TaxonomyStore::new().snapshot().unwrap());
    assert!(report.rows.is_empty());

    let html = render_html(&report).unwrap();
    assert!(html.contains("<h1>Loggregator Metrics</h1>"));
    assert!(html.contains("Total Number of Metrics: 0"));
    assert!(html.contains("<th>Origin</th><th>Category</th><th>Sub Category</th>"));
}

#[test]
fn html_uses_rowspan_only_for_multi_category_origins() {
    let report = Report::from_snapshot(&sample_store().snapshot().unwrap());
    let html = render_html(&report).unwrap();

    assert!(html.contains("<td rowspan=2>router</td>"));
    assert!(html.contains("<td>doppler</td>"));
    assert!(!html.contains("rowspan=1"));
    assert_eq!(html.matches("router").count(), 1);
    assert!(html.contains("Total Number of Metrics: 4"));
}

#[test]
fn html_marks_category_only_cells() {
    let report = Report::from_snapshot(&sample_store().snapshot().unwrap());
    let html = render_html(&report).unwrap();

    assert!(html.contains("<td style=\"border-right:none\">latency</td>"));
    assert!(html.contains("<td style=\"border-left:none\"></td>"));
    assert!(html.contains("<tr><td>app<table border=0><tr><td>total</td></tr></table></td></tr>"));
    assert!(html.contains("<tr><td>bad</td></tr>"));
}

#[test]
fn html_escapes_stream_supplied_text() {
    let store = TaxonomyStore::new();
    store.ingest("<script>", "a&b.\"q\"").unwrap();

    let html = render_html(&Report::from_snapshot(&store.snapshot().unwrap())).unwrap();
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("a&amp;b"));
    assert!(html.contains("&quot;q&quot;"));
    assert!(!html.contains("<script>"));
}
