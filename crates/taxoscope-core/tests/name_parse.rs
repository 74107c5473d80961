#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use taxoscope_core::parse_metric_name;

#[test]
fn splits_on_first_dot_only() {
    assert_eq!(parse_metric_name("foo"), ("foo", ""));
    assert_eq!(parse_metric_name("foo.bar"), ("foo", "bar"));
    assert_eq!(parse_metric_name("foo.bar.baz"), ("foo", "bar.baz"));
}

#[test]
fn edge_inputs_are_total() {
    assert_eq!(parse_metric_name(""), ("", ""));
    assert_eq!(parse_metric_name("."), ("", ""));
    assert_eq!(parse_metric_name(".bar"), ("", "bar"));
    assert_eq!(parse_metric_name("foo."), ("foo", ""));
}
