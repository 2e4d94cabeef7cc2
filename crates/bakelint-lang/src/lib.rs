#![warn(missing_docs)]
//! `bakelint-lang` - data-driven language profiles for bakelint hosts.
//!
//! A [`LanguageProfile`] bundles what an editor needs at configuration time to support one
//! [`SourceKind`]: token rules for colouring, comment tokens and static completion candidates.
//! None of it takes part in analysis.

mod comment;
mod completion;
mod highlight;

pub use comment::CommentConfig;
pub use completion::{
    BUILDCONF_COMPLETIONS, C_COMPLETIONS, Completion, CompletionKind, CompletionList,
    CompletionSource,
};
pub use highlight::{RegexHighlighter, Token, TokenKind, TokenRule};

use bakelint_core::SourceKind;
use thiserror::Error;

/// Errors produced while building language profiles.
#[derive(Debug, Error)]
pub enum LanguageError {
    /// A token rule pattern failed to compile.
    #[error("invalid token pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Everything a host registers for one source kind.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    /// The source kind this profile describes.
    pub kind: SourceKind,
    /// Language id for the host (`"c"`, `"buildconf"`).
    pub id: &'static str,
    /// Comment tokens.
    pub comments: CommentConfig,
    /// Token rules.
    pub highlighter: RegexHighlighter,
    /// Completion candidates.
    pub completions: CompletionSource,
}

impl LanguageProfile {
    /// The built-in profile for `kind`.
    pub fn for_kind(kind: SourceKind) -> Result<Self, LanguageError> {
        Ok(match kind {
            SourceKind::C => Self {
                kind,
                id: "c",
                comments: CommentConfig::line_and_block("//", "/*", "*/"),
                highlighter: RegexHighlighter::c_default()?,
                completions: CompletionSource::new(C_COMPLETIONS.iter().copied()),
            },
            SourceKind::Buildconf => Self {
                kind,
                id: "buildconf",
                comments: CommentConfig::line(";;"),
                highlighter: RegexHighlighter::buildconf_default()?,
                completions: CompletionSource::new(BUILDCONF_COMPLETIONS.iter().copied()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles() {
        for kind in SourceKind::ALL {
            let profile = LanguageProfile::for_kind(kind).unwrap();
            assert_eq!(profile.kind, kind);
            assert!(profile.comments.has_line());
            assert!(!profile.highlighter.rules().is_empty());
            assert!(!profile.completions.candidates().is_empty());
        }

        let c = LanguageProfile::for_kind(SourceKind::C).unwrap();
        assert_eq!(c.id, "c");
        assert!(c.comments.has_block());
        assert!(c.comments.is_line_comment("// note"));
    }

    #[test]
    fn test_error_message_names_pattern() {
        let err = TokenRule::new("(unclosed", TokenKind::Comment).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("invalid token pattern \"(unclosed\"")
        );
    }
}
