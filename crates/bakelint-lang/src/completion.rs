//! Static completion candidates.

use regex::Regex;
use std::sync::LazyLock;

static WORD_BEFORE_CURSOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_./-]+$").expect("static completion word pattern must compile")
});

/// How a host should render a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// Directives and `#include` lines.
    Keyword,
    /// Block tags.
    Type,
    /// Anything call-shaped.
    Function,
    /// Everything else.
    Variable,
}

impl CompletionKind {
    /// Infer the kind from a candidate label.
    pub fn for_label(label: &str) -> Self {
        if label.starts_with('.') {
            CompletionKind::Keyword
        } else if label.starts_with('[') {
            CompletionKind::Type
        } else if label.contains('(') {
            CompletionKind::Function
        } else if label.starts_with("#include") {
            CompletionKind::Keyword
        } else {
            CompletionKind::Variable
        }
    }
}

/// A completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Text inserted on accept.
    pub label: String,
    /// Rendering hint.
    pub kind: CompletionKind,
}

impl Completion {
    /// A candidate whose kind is inferred from `label`.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let kind = CompletionKind::for_label(&label);
        Self { label, kind }
    }

    fn matches(&self, word: &str) -> bool {
        self.label.starts_with(word) || self.label.trim_start_matches(['[', '#']).starts_with(word)
    }
}

/// Result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionList<'a> {
    /// Byte offset (in the text before the cursor) where the replaced word starts.
    pub from: usize,
    /// The word being completed.
    pub word: &'a str,
    /// Matching candidates, in registration order.
    pub items: Vec<&'a Completion>,
}

/// A fixed list of candidates for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSource {
    candidates: Vec<Completion>,
}

impl CompletionSource {
    /// Build a source from labels; kinds are inferred.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: labels.into_iter().map(Completion::new).collect(),
        }
    }

    /// All candidates.
    pub fn candidates(&self) -> &[Completion] {
        &self.candidates
    }

    /// Complete the word that ends at the cursor.
    ///
    /// `before_cursor` is the buffer text up to the cursor. Without a word under the cursor the
    /// popup only opens right after `.` or `[`, unless the user asked for it (`explicit`).
    pub fn complete<'a>(
        &'a self,
        before_cursor: &'a str,
        explicit: bool,
    ) -> Option<CompletionList<'a>> {
        match WORD_BEFORE_CURSOR.find(before_cursor) {
            Some(word) => Some(CompletionList {
                from: word.start(),
                word: word.as_str(),
                items: self
                    .candidates
                    .iter()
                    .filter(|c| c.matches(word.as_str()))
                    .collect(),
            }),
            None => {
                let opens_popup = explicit || before_cursor.ends_with(['.', '[']);
                opens_popup.then(|| CompletionList {
                    from: before_cursor.len(),
                    word: "",
                    items: self.candidates.iter().collect(),
                })
            }
        }
    }
}

/// Candidates offered in C buffers.
pub const C_COMPLETIONS: &[&str] = &[
    "#include <stdio.h>",
    "#include <stdlib.h>",
    "#include <string.h>",
    "#include <stdbool.h>",
    "#include <stdint.h>",
    "int main(void) {",
    "printf(\"Hello\\n\");",
    "puts(\"Hello\");",
    "return 0;",
    "int",
    "void",
    "char",
    "float",
    "double",
    "long",
    "short",
    "unsigned",
    "signed",
    "size_t",
    "bool",
    "true",
    "false",
    "struct",
    "typedef",
    "if",
    "else",
    "for",
    "while",
    "switch",
    "case",
    "break",
    "continue",
    "do",
    "goto",
    "return",
    "malloc",
    "free",
    "strlen",
    "strcpy",
    "memcpy",
    "memcmp",
    "strncpy",
    "snprintf",
    "fgets",
    "scanf",
    "fopen",
    "fclose",
    "fread",
    "fwrite",
    "FILE",
    "stdout",
    "stderr",
];

/// Candidates offered in buildconf buffers.
pub const BUILDCONF_COMPLETIONS: &[&str] = &[
    "[workspace]",
    "[profile debug]",
    "[tool cc]",
    "[bake build]",
    "[run cc]",
    "[export]",
    ".set",
    ".exec",
    ".make",
    ".needs",
    ".output",
    ".takes",
    ".emits",
    ".ref",
    "bake",
    "profile",
    "tool",
    "set",
    "run",
    "export",
    "make",
    "takes",
    "emits",
    "output",
    "cglob",
    "glob",
    "file",
    "list",
    "as",
    "@args",
    "mode",
    "name",
    "root",
    "target_dir",
];
