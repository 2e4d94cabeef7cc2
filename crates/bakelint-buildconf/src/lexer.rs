//! Line lexer for buildconf documents.
//!
//! The dialect is strictly line oriented: every line is exactly one of blank, `;;` comment,
//! `!muf` header, `[tag name]` block opener, `..` block closer, `.directive args…`, or free
//! text (which the checks mostly ignore).

use regex::Regex;
use std::sync::LazyLock;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("static buildconf pattern must compile")
}

static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^\s*\[([A-Za-z0-9_-]+)(?:\s+([^\]]+))?\]"));
static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^\s*\.([A-Za-z_][A-Za-z0-9_-]*)(?:\s+(.*))?$"));
static VALID_HEADER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\s*!muf\s+4\s*$"));
static IDENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Za-z0-9_-]+$"));

/// The recognized block tags.
pub const KNOWN_TAGS: &[&str] = &["workspace", "profile", "tool", "bake", "run", "export"];

/// What a single line is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// `;; …`
    Comment,
    /// `!muf …`; `valid` when the line is exactly `!muf 4` (modulo whitespace).
    Header { valid: bool },
    /// `[tag]` or `[tag name]`. `name` is set only when it is a plain identifier.
    Open {
        tag: &'a str,
        name: Option<&'a str>,
    },
    /// `..`
    Close,
    /// `.name rest`
    Directive { name: &'a str, rest: &'a str },
    /// Anything else.
    Text,
}

/// One lexed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// The raw line, without its `\n`.
    pub raw: &'a str,
    /// Classification.
    pub kind: LineKind<'a>,
}

impl<'a> Line<'a> {
    /// Trimmed text.
    pub fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }

    /// Neither blank nor a comment.
    pub fn is_meaningful(&self) -> bool {
        !matches!(self.kind, LineKind::Blank | LineKind::Comment)
    }
}

/// Lex `source` into lines.
pub fn lex(source: &str) -> Vec<Line<'_>> {
    source
        .split('\n')
        .enumerate()
        .map(|(idx, raw)| Line {
            number: idx + 1,
            raw,
            kind: classify_line(raw),
        })
        .collect()
}

fn classify_line(raw: &str) -> LineKind<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with(";;") {
        return LineKind::Comment;
    }
    if trimmed.starts_with("!muf") {
        return LineKind::Header {
            valid: VALID_HEADER.is_match(raw),
        };
    }
    if trimmed == ".." {
        return LineKind::Close;
    }
    if let Some(caps) = OPEN_TAG.captures(raw) {
        if let Some(tag) = caps.get(1) {
            let name = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|n| IDENT.is_match(n));
            return LineKind::Open {
                tag: tag.as_str(),
                name,
            };
        }
    }
    if let Some(caps) = DIRECTIVE.captures(raw) {
        if let Some(name) = caps.get(1) {
            let rest = caps.get(2).map_or("", |m| m.as_str().trim_end());
            return LineKind::Directive {
                name: name.as_str(),
                rest,
            };
        }
    }
    LineKind::Text
}

/// A directive argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arg<'a> {
    /// Argument text, without surrounding quotes.
    pub text: &'a str,
    /// Whether the argument was written as `"…"`.
    pub quoted: bool,
}

/// Split directive arguments on whitespace; `"…"` is one argument (an unterminated quote runs
/// to the end of the line).
pub fn tokenize_args(rest: &str) -> Vec<Arg<'_>> {
    let mut args = Vec::new();
    let mut remaining = rest.trim_start();

    while !remaining.is_empty() {
        if let Some(after_quote) = remaining.strip_prefix('"') {
            let (text, tail) = match after_quote.find('"') {
                Some(end) => (&after_quote[..end], &after_quote[end + 1..]),
                None => (after_quote, ""),
            };
            args.push(Arg { text, quoted: true });
            remaining = tail.trim_start();
        } else {
            let end = remaining
                .find(char::is_whitespace)
                .unwrap_or(remaining.len());
            args.push(Arg {
                text: &remaining[..end],
                quoted: false,
            });
            remaining = remaining[end..].trim_start();
        }
    }

    args
}
