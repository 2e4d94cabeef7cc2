//! First-class diagnostics data model.
//!
//! Diagnostics are value objects: analyzers create them, the orchestrator filters and sorts
//! them, and nothing mutates them afterwards. A diagnostic is either anchored to a 1-based
//! line or global to its buffer (e.g. "no export block").

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity tiers, most serious first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document is broken.
    Error,
    /// The document is suspicious.
    Warning,
    /// The document works, but a recommended form exists.
    Suggestion,
}

impl Severity {
    /// Lowercase name, as shown in issue lists.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Severity tier.
    pub severity: Severity,
    /// Stable rule identifier (e.g. `"C011"`), if the producer has one.
    pub code: Option<String>,
    /// Human-readable message, namespaced by source kind (`"C: "` / `"buildconf: "`).
    pub message: String,
    /// 1-based line, or `None` for buffer-global findings.
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create an unanchored diagnostic with an explicit severity and rule code.
    pub fn new(severity: Severity, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: Some(code.to_string()),
            message: message.into(),
            line: None,
        }
    }

    /// Create a diagnostic whose severity is derived from its message text.
    ///
    /// See [`classify`](crate::classify()).
    pub fn classified(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            severity: crate::classify(&message),
            code: None,
            message,
            line: None,
        }
    }

    /// Anchor the diagnostic to a 1-based line. A line of `0` leaves it unanchored.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = (line > 0).then_some(line);
        self
    }

    /// Anchor the diagnostic to an optional 1-based line.
    pub fn at_optional_line(mut self, line: Option<usize>) -> Self {
        self.line = line.filter(|&l| l > 0);
        self
    }

    /// Sort key: anchored diagnostics by line, unanchored ones last.
    pub fn sort_line(&self) -> usize {
        self.line.unwrap_or(usize::MAX)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", line, self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// The ordered outcome of one analysis pass.
///
/// Diagnostics are sorted ascending by line; unanchored diagnostics come after all anchored
/// ones. The sort is stable, so ties keep the order the analyzer produced them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    /// An empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort `diagnostics` into a result.
    pub fn from_diagnostics(mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by_key(Diagnostic::sort_line);
        Self { diagnostics }
    }

    /// Merge several results into one sorted result, preserving input order for ties.
    pub fn merge<'a>(results: impl IntoIterator<Item = &'a AnalysisResult>) -> Self {
        let diagnostics = results
            .into_iter()
            .flat_map(|r| r.diagnostics.iter().cloned())
            .collect();
        Self::from_diagnostics(diagnostics)
    }

    /// Sorted diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the result, returning the sorted diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Iterate the sorted diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` when the pass found nothing.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
