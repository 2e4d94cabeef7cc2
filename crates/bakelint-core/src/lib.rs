#![warn(missing_docs)]
//! `bakelint-core` - shared data model for the bakelint analyzers.
//!
//! # Overview
//!
//! bakelint scans two small textual formats as the user types: a C source snippet and a
//! declarative build configuration ("buildconf", `!muf 4` documents). Each analyzer is a pure
//! function from text to a list of [`Diagnostic`]s; this crate holds everything the analyzers
//! and the orchestrator have in common:
//!
//! - [`Severity`] / [`Diagnostic`] / [`AnalysisResult`] - the diagnostic value types
//! - [`classify`] - severity derived from message text (for messages without a severity)
//! - [`Analyzer`] - the seam both analyzers implement
//! - [`LineIndex`] - line lookup and clamping for editor coordinates
//! - [`Marker`] - position-anchored annotations pushed to an editor
//! - [`LintConfig`] - per-rule enable/disable and severity overrides
//!
//! # Example
//!
//! ```rust
//! use bakelint_core::{AnalysisResult, Diagnostic, Severity};
//!
//! let result = AnalysisResult::from_diagnostics(vec![
//!     Diagnostic::new(Severity::Warning, "C999", "C: global finding."),
//!     Diagnostic::new(Severity::Error, "C998", "C: anchored finding.").at_line(3),
//! ]);
//!
//! // Anchored diagnostics come first; unanchored ones sort last.
//! assert_eq!(result.diagnostics()[0].line, Some(3));
//! assert_eq!(result.diagnostics()[1].line, None);
//! ```

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod line_index;
pub mod markers;
pub mod processing;
pub mod source;

pub use classify::classify;
pub use config::{ConfigError, LintConfig};
pub use diagnostics::{AnalysisResult, Diagnostic, Severity};
pub use line_index::LineIndex;
pub use markers::{Marker, MarkerSeverity, markers_for};
pub use processing::Analyzer;
pub use source::{SourceBuffer, SourceKind};
