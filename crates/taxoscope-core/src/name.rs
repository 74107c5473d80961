//! Metric name parsing.

/// Split a dotted metric name at the first `.` into `(category, remainder)`.
///
/// Total: a name without a dot is all category, and the empty string yields
/// two empty parts.
pub fn parse_metric_name(name: &str) -> (&str, &str) {
    name.split_once('.').unwrap_or((name, ""))
}
