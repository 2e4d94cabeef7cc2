#![warn(missing_docs)]
//! `bakelint` - live analysis for a C snippet and a `!muf 4` build configuration.
//!
//! This crate wires the two analyzers ([`bakelint_c`], [`bakelint_buildconf`]) to editable
//! buffers:
//!
//! - [`Orchestrator`] - owns both buffers, re-analyzes on every change, publishes results
//! - [`EditorAdapter`] - the seam to a text-editing widget (markers, language, completions)
//! - [`BuildReport`] - the simulated "run build" action
//!
//! # Example
//!
//! ```rust
//! use bakelint::{MemoryEditor, Orchestrator};
//! use bakelint_core::SourceKind;
//! use std::sync::{Arc, Mutex};
//!
//! let mut orchestrator = Orchestrator::default();
//! let editor = Arc::new(Mutex::new(MemoryEditor::new("int main(void) {\n  return 0\n}")));
//! orchestrator.attach(SourceKind::C, Box::new(Arc::clone(&editor))).unwrap();
//!
//! let markers = editor.lock().unwrap().markers().to_vec();
//! assert_eq!(markers.len(), 1);
//! assert_eq!(markers[0].line, 2);
//!
//! editor.lock().unwrap().edit("int main(void) {\n  return 0;\n}");
//! orchestrator.handle_change(SourceKind::C);
//! assert!(editor.lock().unwrap().markers().is_empty());
//! ```

mod adapter;
mod build;
pub mod defaults;
mod error;
mod orchestrator;

pub use adapter::{EditorAdapter, MemoryEditor};
pub use build::{BUILD_ARTIFACTS, BuildReport, BuildStatus};
pub use error::BakelintError;
pub use orchestrator::{AnalysisCallback, AnalysisUpdate, BufferState, Document, Orchestrator};
