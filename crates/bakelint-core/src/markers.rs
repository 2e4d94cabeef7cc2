//! Editor markers derived from diagnostics.
//!
//! A marker is what an editor actually renders: a severity-coloured span on one line with a
//! hover message. Markers are always published as a full set per buffer, never incrementally.

use crate::diagnostics::{Diagnostic, Severity};
use crate::line_index::LineIndex;

/// Marker severities understood by editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSeverity {
    /// Error marker.
    Error,
    /// Warning marker.
    Warning,
    /// Informational marker (used for suggestions).
    Info,
}

impl From<Severity> for MarkerSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => MarkerSeverity::Error,
            Severity::Warning => MarkerSeverity::Warning,
            Severity::Suggestion => MarkerSeverity::Info,
        }
    }
}

/// A position-anchored annotation for an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// 1-based line.
    pub line: usize,
    /// 1-based start column (in `char`s).
    pub column: usize,
    /// 1-based exclusive end column (in `char`s).
    pub end_column: usize,
    /// Marker severity.
    pub severity: MarkerSeverity,
    /// Hover message.
    pub message: String,
    /// Rule code of the originating diagnostic, if any.
    pub code: Option<String>,
}

/// Convert diagnostics to markers for the buffer described by `line_index`.
///
/// - Unanchored diagnostics produce no marker.
/// - Out-of-range lines are clamped into `1..=line_count`.
/// - Each marker spans its whole line.
pub fn markers_for(line_index: &LineIndex, diagnostics: &[Diagnostic]) -> Vec<Marker> {
    diagnostics
        .iter()
        .filter_map(|diag| {
            let line = line_index.clamp_line(diag.line?);
            Some(Marker {
                line,
                column: 1,
                end_column: line_index.line_char_len(line) + 1,
                severity: diag.severity.into(),
                message: diag.message.clone(),
                code: diag.code.clone(),
            })
        })
        .collect()
}
