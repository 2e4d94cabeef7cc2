//! `bakelint-buildconf` - consistency checks for `!muf 4` build configuration documents.
//!
//! A buildconf document declares a workspace, the tools it drives, the bakes (recipes) that
//! run those tools and the outputs they produce:
//!
//! ```text
//! !muf 4
//! [workspace]
//!   .set name "app"
//!   .set root "."
//!   .set target_dir "target"
//!   .set profile "debug"
//! ..
//! [tool cc]
//!   .exec "cc"
//! ..
//! [bake build]
//!   .make c_src cglob "src/*.c"
//!   [run cc]
//!     .takes c_src as "@args"
//!     .emits exe as "-o"
//!     .set "-O2"
//!   ..
//!   .output exe "target/out/app.exe"
//! ..
//! [export]
//!   .ref build
//! ..
//! [profile debug]
//! ..
//! ```
//!
//! Analysis lexes the text line by line, nests blocks into a tree ([`Document`]) and runs a
//! fixed catalogue of checks ([`BuildconfRule`]) over it. Like the C analyzer it is total: any
//! text, including a half-typed one, yields a (possibly empty) list of diagnostics.

#![warn(missing_docs)]

mod checks;
pub mod document;
pub mod lexer;
mod rules;

pub use document::{Block, Directive, Document};
pub use rules::BuildconfRule;

use bakelint_core::{Analyzer, Diagnostic, SourceKind};

/// Check a buildconf buffer and return its diagnostics in catalogue order.
pub fn analyze_buildconf(source: &str) -> Vec<Diagnostic> {
    checks::run_all(&Document::parse(source))
}

/// [`Analyzer`] implementation for buildconf buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildconfAnalyzer;

impl Analyzer for BuildconfAnalyzer {
    fn kind(&self) -> SourceKind {
        SourceKind::Buildconf
    }

    fn analyze(&self, source: &str) -> Vec<Diagnostic> {
        analyze_buildconf(source)
    }
}
