//! Comparison output types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single diagnostic.
///
/// Ordered so that `Error` is the most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Exact matches
    Info,
    /// Drift that may still be backward-compatible (renames, sizes, additions)
    Warning,
    /// Structural changes that break upgrade safety
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation made while comparing two layouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Nesting depth, used only for indentation when rendering
    pub depth: usize,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, depth: usize) -> Self {
        Self {
            severity,
            message: message.into(),
            depth,
        }
    }
}

/// Result of one comparison call.
///
/// `failed` is true iff `diagnostics` contains at least one `Error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub diagnostics: Vec<Diagnostic>,
    pub failed: bool,
}

impl Comparison {
    /// Number of diagnostics with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// True if anything other than `Info` was reported
    pub fn has_changes(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity != Severity::Info)
    }

    /// Diagnostics at or above the given severity, in discovery order
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity >= severity)
    }

    /// Highest severity reported, if any diagnostic exists
    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_comparison_counts_and_changes() {
        let comparison = Comparison {
            diagnostics: vec![
                Diagnostic::new(Severity::Info, "\"a\": at same location", 1),
                Diagnostic::new(Severity::Warning, "\"b\": found new storage entry", 1),
            ],
            failed: false,
        };
        assert_eq!(comparison.count(Severity::Info), 1);
        assert_eq!(comparison.count(Severity::Error), 0);
        assert!(comparison.has_changes());
        assert_eq!(comparison.at_least(Severity::Warning).count(), 1);
        assert_eq!(comparison.max_severity(), Some(Severity::Warning));
    }

    #[test]
    fn test_empty_comparison_has_no_changes() {
        let comparison = Comparison::default();
        assert!(!comparison.has_changes());
        assert_eq!(comparison.max_severity(), None);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }
}
