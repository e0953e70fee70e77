//! Human-readable rendering of comparison diagnostics.

use console::Style;

use crate::compare::model::{Comparison, Severity};

const INDENT: &str = "  ";

/// Render diagnostics as indented text lines.
///
/// Only diagnostics at or above `verbosity` are included: `Error` shows
/// errors only, `Warning` adds warnings, `Info` shows everything. Each line
/// is indented by two spaces per depth level. With `color`, errors are red
/// and warnings yellow.
pub fn render_diagnostics(comparison: &Comparison, verbosity: Severity, color: bool) -> String {
    let mut out = String::new();
    for diagnostic in comparison.at_least(verbosity) {
        let style = severity_style(diagnostic.severity).force_styling(color);
        out.push_str(&INDENT.repeat(diagnostic.depth));
        out.push_str(&style.apply_to(&diagnostic.message).to_string());
        out.push('\n');
    }
    out
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Error => Style::new().red(),
        Severity::Warning => Style::new().yellow(),
        Severity::Info => Style::new(),
    }
}

/// One-line count of diagnostics per severity.
pub fn render_summary(comparison: &Comparison) -> String {
    let status = match comparison.max_severity() {
        Some(Severity::Error) => "FAILED",
        _ => "ok",
    };
    format!(
        "{}: {} error(s), {} warning(s), {} info",
        status,
        comparison.count(Severity::Error),
        comparison.count(Severity::Warning),
        comparison.count(Severity::Info)
    )
}
