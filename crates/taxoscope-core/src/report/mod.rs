//! Row-oriented report built from a taxonomy snapshot.
//!
//! One row per `(origin, category)`. The origin cell appears on the first row
//! of each origin and spans all of its rows. Subcategories are split once for
//! display: the first segment is shown with the rest of the name beneath it.

pub mod html;

use serde::Serialize;

use crate::name::parse_metric_name;
use crate::taxonomy::{CategoryEntry, TaxonomySnapshot};

pub use html::render_html;

/// Origin cell, present on the first row of an origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginCell {
    pub name: String,
    /// Number of rows (categories) belonging to the origin.
    pub row_span: usize,
}

/// A subcategory split for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryCell {
    pub segment: String,
    /// Empty when the subcategory has no further dot.
    pub remainder: String,
}

impl SubcategoryCell {
    fn split(subcategory: &str) -> Self {
        let (segment, remainder) = parse_metric_name(subcategory);
        Self {
            segment: segment.to_string(),
            remainder: remainder.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub origin: Option<OriginCell>,
    pub category: String,
    /// `None` for category-only entries.
    pub subcategories: Option<Vec<SubcategoryCell>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_metrics: usize,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn from_snapshot(snapshot: &TaxonomySnapshot) -> Self {
        let mut rows = Vec::with_capacity(snapshot.category_count());

        for (origin, taxonomy) in snapshot.origins() {
            for (i, entry) in taxonomy.entries().iter().enumerate() {
                let origin = (i == 0).then(|| OriginCell {
                    name: origin.to_string(),
                    row_span: taxonomy.len(),
                });

                let subcategories = match entry {
                    CategoryEntry::CategoryOnly { .. } => None,
                    CategoryEntry::WithSubcategories { subcategories, .. } => Some(
                        subcategories
                            .iter()
                            .map(|s| SubcategoryCell::split(s))
                            .collect(),
                    ),
                };

                rows.push(ReportRow {
                    origin,
                    category: entry.category().to_string(),
                    subcategories,
                });
            }
        }

        Self {
            total_metrics: snapshot.total_metrics(),
            rows,
        }
    }
}
