//! The simulated "run build" action.
//!
//! Nothing is compiled: a build re-runs both analyses and reports a pass/fail status
//! derived from them, plus the fixed artifact list a real build of the starter project
//! would produce.

use bakelint_core::{AnalysisResult, Diagnostic, Severity};
use std::fmt;

/// Artifacts listed by every build report.
pub const BUILD_ARTIFACTS: &[&str] = &["target/out/app.exe", "target/out/app.o"];

/// Outcome of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// No error-level diagnostics.
    Succeeded,
    /// At least one error-level diagnostic.
    Failed,
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildStatus::Succeeded => "succeeded",
            BuildStatus::Failed => "failed",
        })
    }
}

/// What a build reports back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Pass/fail status.
    pub status: BuildStatus,
    /// One-line human-readable summary.
    pub summary: String,
    /// Artifact paths.
    pub artifacts: Vec<String>,
    /// Combined, sorted diagnostics of both buffers.
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    /// Derive a report from the combined analysis.
    pub fn from_analysis(combined: AnalysisResult) -> Self {
        let errors = combined.count(Severity::Error);
        let warnings = combined.count(Severity::Warning);
        let suggestions = combined.count(Severity::Suggestion);
        let status = if errors > 0 {
            BuildStatus::Failed
        } else {
            BuildStatus::Succeeded
        };

        Self {
            status,
            summary: format!(
                "build {status}: {errors} error(s), {warnings} warning(s), {suggestions} suggestion(s)"
            ),
            artifacts: BUILD_ARTIFACTS.iter().map(|a| a.to_string()).collect(),
            diagnostics: combined.into_diagnostics(),
        }
    }

    /// Returns `true` if the build passed.
    pub fn succeeded(&self) -> bool {
        self.status == BuildStatus::Succeeded
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;
        for artifact in &self.artifacts {
            writeln!(f, "  artifact: {artifact}")?;
        }
        Ok(())
    }
}
