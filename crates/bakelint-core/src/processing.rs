//! Generic analysis interface.
//!
//! Each analyzer crate (`bakelint-c`, `bakelint-buildconf`) implements [`Analyzer`] for its
//! source kind. The orchestrator only talks to analyzers through this trait, so a host can
//! swap in its own rule set for either kind.

use crate::diagnostics::Diagnostic;
use crate::source::SourceKind;

/// A rule set that scans a whole buffer and reports diagnostics.
///
/// Implementations must be pure and total:
/// - the same text always yields the same diagnostics, in the same order
/// - no input (empty, whitespace-only, half-typed, binary-looking) makes them panic
///
/// There is no error type: an analyzer that cannot make sense of its input reports nothing
/// (or reports what it can) instead of failing.
pub trait Analyzer {
    /// The source kind this analyzer understands.
    fn kind(&self) -> SourceKind;

    /// Scan `source` and return its diagnostics in rule order (unsorted).
    fn analyze(&self, source: &str) -> Vec<Diagnostic>;
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn analyze(&self, source: &str) -> Vec<Diagnostic> {
        (**self).analyze(source)
    }
}
