//! Category entries and the aggregation rules applied per origin.

use serde::Serialize;

use crate::name::parse_metric_name;

/// One observed category of an origin.
///
/// The variant is fixed at creation: an entry first seen without a
/// subcategory stays `CategoryOnly` for good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    /// No subcategory has been recorded.
    CategoryOnly { category: String },
    /// Distinct subcategories in first-seen order.
    WithSubcategories {
        category: String,
        subcategories: Vec<String>,
    },
}

impl CategoryEntry {
    pub fn category(&self) -> &str {
        match self {
            CategoryEntry::CategoryOnly { category } => category,
            CategoryEntry::WithSubcategories { category, .. } => category,
        }
    }

    /// Number of leaf metrics this entry accounts for.
    pub fn leaf_count(&self) -> usize {
        match self {
            CategoryEntry::CategoryOnly { .. } => 1,
            CategoryEntry::WithSubcategories { subcategories, .. } => subcategories.len(),
        }
    }
}

/// What a single observation did to the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A category entry was created.
    NewCategory,
    /// A subcategory was appended to an existing entry.
    NewSubcategory,
    /// Already known; nothing changed.
    Unchanged,
    /// Subcategory seen for a `CategoryOnly` entry and discarded.
    DroppedOnCategoryOnly,
}

impl IngestOutcome {
    /// Label used for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            IngestOutcome::NewCategory => "new_category",
            IngestOutcome::NewSubcategory => "new_subcategory",
            IngestOutcome::Unchanged => "unchanged",
            IngestOutcome::DroppedOnCategoryOnly => "dropped_category_only",
        }
    }

    pub fn is_mutation(self) -> bool {
        matches!(self, IngestOutcome::NewCategory | IngestOutcome::NewSubcategory)
    }
}

/// Ordered category entries of one origin, unique by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OriginTaxonomy {
    entries: Vec<CategoryEntry>,
}

impl OriginTaxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.category() == category)
    }

    /// Leaf metrics across all entries.
    pub fn leaf_count(&self) -> usize {
        self.entries.iter().map(CategoryEntry::leaf_count).sum()
    }

    /// Apply one metric name to this origin.
    ///
    /// Categories and subcategories keep first-seen order and are never
    /// duplicated. Entries are never removed or re-typed.
    pub fn observe(&mut self, metric_name: &str) -> IngestOutcome {
        let (category, remainder) = parse_metric_name(metric_name);

        match self.entries.iter_mut().find(|e| e.category() == category) {
            Some(CategoryEntry::WithSubcategories { subcategories, .. }) => {
                if remainder.is_empty() || subcategories.iter().any(|s| s == remainder) {
                    return IngestOutcome::Unchanged;
                }
                subcategories.push(remainder.to_string());
                IngestOutcome::NewSubcategory
            }
            Some(CategoryEntry::CategoryOnly { .. }) => {
                if remainder.is_empty() {
                    IngestOutcome::Unchanged
                } else {
                    tracing::debug!(category, remainder, "subcategory dropped on category-only entry");
                    IngestOutcome::DroppedOnCategoryOnly
                }
            }
            None => {
                let entry = if remainder.is_empty() {
                    CategoryEntry::CategoryOnly {
                        category: category.to_string(),
                    }
                } else {
                    CategoryEntry::WithSubcategories {
                        category: category.to_string(),
                        subcategories: vec![remainder.to_string()],
                    }
                };
                self.entries.push(entry);
                IngestOutcome::NewCategory
            }
        }
    }
}
