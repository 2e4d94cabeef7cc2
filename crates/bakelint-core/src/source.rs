//! Source kinds and immutable buffer snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The two document kinds bakelint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A C source snippet.
    C,
    /// A `!muf 4` build configuration document.
    Buildconf,
}

impl SourceKind {
    /// Both kinds, in presentation order.
    pub const ALL: [SourceKind; 2] = [SourceKind::C, SourceKind::Buildconf];

    /// Message namespace prefix used by diagnostics of this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            SourceKind::C => "C:",
            SourceKind::Buildconf => "buildconf:",
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            SourceKind::C => "c",
            SourceKind::Buildconf => "buildconf",
        }
    }

    /// Guess the kind from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "c" | "h" => Some(SourceKind::C),
            "muf" | "buildconf" | "steelconf" => Some(SourceKind::Buildconf),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable snapshot of one editable document.
///
/// Buffers are replaced wholesale on every edit; cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    kind: SourceKind,
    text: Arc<str>,
}

impl SourceBuffer {
    /// Snapshot `text` as a buffer of the given kind.
    pub fn new(kind: SourceKind, text: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// The buffer's kind.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// The buffer's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of `\n`-separated lines (an empty buffer has one line).
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}
