//! Concurrent writers and snapshot readers on one store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use taxoscope_core::report::{render_html, Report};
use taxoscope_core::{CategoryEntry, TaxonomySnapshot, TaxonomyStore};

const WRITERS: usize = 4;
const READERS: usize = 4;
const EVENTS: usize = 500;

fn assert_invariants(snap: &TaxonomySnapshot) {
    for (origin, taxonomy) in snap.origins() {
        let mut seen = HashSet::new();
        for entry in taxonomy.entries() {
            assert!(seen.insert(entry.category()), "duplicate category in {origin}");
            if let CategoryEntry::WithSubcategories { subcategories, .. } = entry {
                let unique: HashSet<&String> = subcategories.iter().collect();
                assert_eq!(unique.len(), subcategories.len(), "duplicate subcategory in {origin}");

                // Writers emit sub0, sub1, ... in order, each twice.
                for (i, s) in subcategories.iter().enumerate() {
                    assert_eq!(s, &format!("sub{i}"), "out of order in {origin}");
                }
            }
        }
    }
}

#[test]
fn concurrent_ingest_and_rendered_snapshots_stay_consistent() {
    let store = Arc::new(TaxonomyStore::new());

    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let origin = format!("origin-{w}");
                for i in 0..EVENTS {
                    let name = format!("cat.sub{i}");
                    store.ingest(&origin, &name).unwrap();
                    store.ingest(&origin, &name).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut last_total = 0;
                for _ in 0..200 {
                    let snap = store.snapshot().unwrap();
                    assert_invariants(&snap);
                    let total = snap.total_metrics();
                    assert!(total >= last_total, "snapshots went backwards");
                    last_total = total;

                    let report = Report::from_snapshot(&snap);
                    assert_eq!(report.total_metrics, total);
                    assert_eq!(report.rows.len(), snap.category_count());
                    let html = render_html(&report).unwrap();
                    assert!(html.contains(&format!("Total Number of Metrics: {total}</p>")));
                }
            })
        })
        .collect();

    for h in writers.into_iter().chain(readers) {
        h.join().unwrap();
    }

    let snap = store.snapshot().unwrap();
    assert_invariants(&snap);
    assert_eq!(snap.origin_count(), WRITERS);
    assert_eq!(snap.total_metrics(), WRITERS * EVENTS);
}
