//! Regex token rules.
//!
//! This is a lightweight tokenizer for editor colouring, not a parser. Each line is matched
//! against every rule; when matches overlap, the one starting first wins, and at the same start
//! the earlier rule wins.

use crate::LanguageError;
use bakelint_core::LineIndex;
use regex::Regex;

/// What a token is, for the host's theme to colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Keywords and directives.
    Keyword,
    /// Block tags such as `[bake build]`.
    Tag,
    /// Comments.
    Comment,
    /// String literals.
    String,
    /// Numeric literals.
    Number,
    /// Preprocessor lines.
    Preprocessor,
    /// Block delimiters such as `..`.
    Delimiter,
}

/// A single regex token rule.
#[derive(Debug, Clone)]
pub struct TokenRule {
    regex: Regex,
    kind: TokenKind,
    capture_group: Option<usize>,
}

impl TokenRule {
    /// Compile `pattern` into a rule producing `kind` tokens.
    pub fn new(pattern: &str, kind: TokenKind) -> Result<Self, LanguageError> {
        let regex = Regex::new(pattern).map_err(|source| LanguageError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            kind,
            capture_group: None,
        })
    }

    /// Token only a capture group of each match.
    pub fn with_capture_group(mut self, group: usize) -> Self {
        self.capture_group = Some(group);
        self
    }

    /// Token kind produced by this rule.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// A token on one line. Columns are 0-based `char` offsets, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// 1-based line.
    pub line: usize,
    /// Start column.
    pub start: usize,
    /// End column (exclusive).
    pub end: usize,
    /// Token kind.
    pub kind: TokenKind,
}

/// An ordered set of [`TokenRule`]s.
#[derive(Debug, Clone)]
pub struct RegexHighlighter {
    rules: Vec<TokenRule>,
}

impl RegexHighlighter {
    /// Build a highlighter; earlier rules take precedence.
    pub fn new(rules: Vec<TokenRule>) -> Self {
        Self { rules }
    }

    /// The rules, in precedence order.
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Tokenize every line of the buffer.
    pub fn highlight(&self, line_index: &LineIndex) -> Vec<Token> {
        let mut tokens = Vec::new();
        for line in 1..=line_index.line_count() {
            let Some(text) = line_index.line_text(line) else {
                continue;
            };
            tokens.extend(self.highlight_line(line, &text));
        }
        tokens
    }

    /// Tokenize a single line.
    pub fn highlight_line(&self, line: usize, text: &str) -> Vec<Token> {
        // (start byte, rule index, end byte)
        let mut matches: Vec<(usize, usize, usize)> = Vec::new();
        for (idx, rule) in self.rules.iter().enumerate() {
            match rule.capture_group {
                Some(group) => {
                    for caps in rule.regex.captures_iter(text) {
                        if let Some(m) = caps.get(group) {
                            matches.push((m.start(), idx, m.end()));
                        }
                    }
                }
                None => {
                    for m in rule.regex.find_iter(text) {
                        matches.push((m.start(), idx, m.end()));
                    }
                }
            }
        }
        matches.sort_unstable();

        let mut tokens = Vec::new();
        let mut covered = 0;
        for (start, idx, end) in matches {
            if start >= end || start < covered {
                continue;
            }
            covered = end;
            tokens.push(Token {
                line,
                start: text[..start].chars().count(),
                end: text[..end].chars().count(),
                kind: self.rules[idx].kind,
            });
        }
        tokens
    }

    /// Token rules for buildconf documents.
    pub fn buildconf_default() -> Result<Self, LanguageError> {
        Ok(Self::new(vec![
            TokenRule::new(r"^\s*(!muf)\b", TokenKind::Keyword)?.with_capture_group(1),
            TokenRule::new(r"^\s*(\[[^\]]+\])", TokenKind::Tag)?.with_capture_group(1),
            TokenRule::new(r"^\s*;;.*$", TokenKind::Comment)?,
            TokenRule::new(r#""[^"]*""#, TokenKind::String)?,
            TokenRule::new(r"^\s*(\.\.)\s*$", TokenKind::Delimiter)?.with_capture_group(1),
            TokenRule::new(r"\.[a-z_]+", TokenKind::Keyword)?,
            TokenRule::new(r"\b\d+\b", TokenKind::Number)?,
        ]))
    }

    /// Token rules for C snippets.
    pub fn c_default() -> Result<Self, LanguageError> {
        Ok(Self::new(vec![
            TokenRule::new(r"^\s*#\s*\w+.*$", TokenKind::Preprocessor)?,
            TokenRule::new(r"//.*$", TokenKind::Comment)?,
            TokenRule::new(r#""(?:\\.|[^"\\])*""#, TokenKind::String)?,
            TokenRule::new(r"'(?:\\.|[^'\\])'", TokenKind::String)?,
            TokenRule::new(
                r"\b(?:int|void|char|float|double|long|short|unsigned|signed|const|static|struct|typedef|if|else|for|while|do|switch|case|break|continue|goto|return|sizeof)\b",
                TokenKind::Keyword,
            )?,
            TokenRule::new(r"\b\d+(?:\.\d+)?\b", TokenKind::Number)?,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_buildconf_tokens() {
        let highlighter = RegexHighlighter::buildconf_default().unwrap();
        let index = LineIndex::from_text("!muf 4\n[bake build]\n  .set \"-O2\" 1\n;; done\n..");
        let tokens = highlighter.highlight(&index);

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Keyword,
                TokenKind::Number,
                TokenKind::Tag,
                TokenKind::Keyword,
                TokenKind::String,
                TokenKind::Number,
                TokenKind::Comment,
                TokenKind::Delimiter,
            ]
        );
        assert_eq!(
            tokens[2],
            Token {
                line: 2,
                start: 0,
                end: 12,
                kind: TokenKind::Tag
            }
        );
    }

    #[test]
    fn test_overlaps_resolve_to_first_start() {
        let highlighter = RegexHighlighter::c_default().unwrap();
        // The keyword inside the string and the comment must not produce tokens.
        let tokens = highlighter.highlight_line(1, "printf(\"int\"); // return");
        assert_eq!(kinds(&tokens), vec![TokenKind::String, TokenKind::Comment]);
    }

    #[test]
    fn test_columns_count_chars() {
        let highlighter = RegexHighlighter::c_default().unwrap();
        let tokens = highlighter.highlight_line(3, "  puts(\"é\"); return 0;");
        assert_eq!(tokens[0].start, 7);
        assert_eq!(tokens[0].end, 10);
        assert_eq!(tokens[1].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].start, 13);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = TokenRule::new("([", TokenKind::Keyword).unwrap_err();
        assert!(matches!(err, LanguageError::InvalidPattern { ref pattern, .. } if pattern == "(["));
    }
}
