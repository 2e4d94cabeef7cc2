//! Severity classification from message text.
//!
//! Analyzers attach a severity to every diagnostic they emit. [`classify`] derives the same
//! tier from the message wording alone, which is useful for messages that arrive without a
//! severity (external tools, hand-written notes) and keeps the analyzers' wording honest: for
//! every message an analyzer produces, `classify(message)` must agree with the attached
//! severity.

use crate::diagnostics::Severity;
use crate::source::SourceKind;

const C_ERROR_SIGNALS: &[&str] = &["missing main function", "empty file", "unbalanced braces"];

const BUILDCONF_ERROR_SIGNALS: &[&str] = &[
    "must be the first meaningful line",
    "missing !muf 4 header",
    "invalid header line",
    "missing [workspace] block",
    "multiple [workspace] blocks",
    "workspace is missing .set",
    "must be a relative path",
    "is not declared by any [profile] block",
    "missing [tool",
    "missing [bake",
    "missing [run",
    "missing .exec",
    "duplicate tool",
    "duplicate bake",
    "uses undeclared tool",
    "has no .make",
    "has no [run",
    "has no .output",
    "must live under target/out/",
    "has no file extension",
    "tab characters are not allowed",
    "tool \"",
    "run \"",
];

const BUILDCONF_SUGGESTION_SIGNALS: &[&str] = &["recommended", "prefer", "snake_case"];

/// Classify a diagnostic message into a severity tier.
///
/// - `C:` messages are warnings unless they report a missing `main`, an empty file or
///   unbalanced braces.
/// - `buildconf:` messages are errors when they match the structural allow-list, suggestions
///   when they are phrased as a recommendation, and warnings otherwise.
/// - Anything else is a warning.
pub fn classify(message: &str) -> Severity {
    if message.starts_with(SourceKind::C.prefix()) {
        if contains_any(message, C_ERROR_SIGNALS) {
            return Severity::Error;
        }
        return Severity::Warning;
    }

    if message.starts_with(SourceKind::Buildconf.prefix()) {
        if contains_any(message, BUILDCONF_ERROR_SIGNALS) {
            return Severity::Error;
        }
        if contains_any(message, BUILDCONF_SUGGESTION_SIGNALS) {
            return Severity::Suggestion;
        }
        return Severity::Warning;
    }

    Severity::Warning
}

fn contains_any(message: &str, signals: &[&str]) -> bool {
    signals.iter().any(|s| message.contains(s))
}
