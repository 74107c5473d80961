//! HTML rendering of a `Report`.
//!
//! All taxonomy strings come from the stream and are escaped before they are
//! written into markup.

use std::fmt::Write;

use crate::error::{Result, TaxoscopeError};

use super::{Report, ReportRow};

/// Escape text for element content and attribute values.
fn escape_html(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    for c in v.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_row(row: &ReportRow, out: &mut String) -> std::fmt::Result {
    out.push_str("<tr>\n");

    if let Some(origin) = &row.origin {
        if origin.row_span > 1 {
            writeln!(out, "<td rowspan={}>{}</td>", origin.row_span, escape_html(&origin.name))?;
        } else {
            writeln!(out, "<td>{}</td>", escape_html(&origin.name))?;
        }
    }

    match &row.subcategories {
        None => {
            writeln!(out, "<td style=\"border-right:none\">{}</td>", escape_html(&row.category))?;
            out.push_str("<td style=\"border-left:none\"></td>");
        }
        Some(subs) => {
            writeln!(out, "<td>{}</td>", escape_html(&row.category))?;
            out.push_str("<td><table border=0>");
            for sub in subs {
                write!(out, "<tr><td>{}", escape_html(&sub.segment))?;
                if !sub.remainder.is_empty() {
                    write!(
                        out,
                        "<table border=0><tr><td>{}</td></tr></table>",
                        escape_html(&sub.remainder)
                    )?;
                }
                out.push_str("</td></tr>");
            }
            out.push_str("</table></td>");
        }
    }

    out.push_str("</tr>\n");
    Ok(())
}

fn render_page(report: &Report, out: &mut String) -> std::fmt::Result {
    out.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n");
    out.push_str("<h1>Loggregator Metrics</h1>\n");
    writeln!(out, "<p>Total Number of Metrics: {}</p>", report.total_metrics)?;
    out.push_str(
        "<table border=1><tr><th>Origin</th><th>Category</th><th>Sub Category</th></tr>\n",
    );
    for row in &report.rows {
        render_row(row, out)?;
    }
    out.push_str("</table></body>\n</html>\n");
    Ok(())
}

/// Render the full report page.
pub fn render_html(report: &Report) -> Result<String> {
    let mut out = String::new();
    render_page(report, &mut out)
        .map_err(|e| TaxoscopeError::Render(format!("html formatting failed: {e}")))?;
    Ok(out)
}
