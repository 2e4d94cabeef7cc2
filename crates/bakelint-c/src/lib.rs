//! `bakelint-c` - heuristic static checks for small C snippets.
//!
//! This is *not* a C parser. Every check is an independent regex or line scan over the whole
//! buffer, which keeps analysis linear and total at the cost of known false positives:
//! - brace counting ignores string/char literals and comments
//! - the per-line semicolon check ignores multi-line statements and block comments
//! - unused-variable detection ignores scope and shadowing
//!
//! ```rust
//! use bakelint_c::analyze_c;
//!
//! let source = "#include <stdio.h>\nint main(void) {\n  printf(\"hi\\n\");\n  fflush(stdout);\n  return 0;\n}";
//! assert!(analyze_c(source).is_empty());
//! ```

mod rules;

pub use rules::CRule;

use bakelint_core::{Analyzer, Diagnostic, LineIndex, SourceKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("static C pattern must compile")
}

static MAIN_DECL: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\bint|\bvoid)\s+main\s*\("));
static MAIN_CALL: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bmain\s*\("));
static INT_MAIN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bint\s+main\s*\("));
static INT_MAIN_VOID: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\bint\s+main\s*\(\s*void\s*\)"));

static PRINTF: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bprintf\s*\("));
static SCANF: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bscanf\s*\("));
static MALLOC: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bmalloc\s*\("));
static FREE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bfree\s*\("));
static STRLEN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bstrlen\s*\("));
static STRCPY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bstrcpy\s*\("));
static PUTS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bputs\s*\("));
static GETS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bgets\s*\("));

static INCLUDE_STDIO: LazyLock<Regex> = LazyLock::new(|| pattern(r"#include\s*<stdio\.h>"));
static INCLUDE_STDLIB: LazyLock<Regex> = LazyLock::new(|| pattern(r"#include\s*<stdlib\.h>"));
static INCLUDE_STRING: LazyLock<Regex> = LazyLock::new(|| pattern(r"#include\s*<string\.h>"));

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:(?:int|float|double|char|long|short|unsigned)\s+)+([A-Za-z_]\w*)")
});
static WORD: LazyLock<Regex> = LazyLock::new(|| pattern(r"\w+"));

static PRINTF_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"\bprintf\s*\(\s*"[^"]*\\n[^"]*""#));
static RETURN_ZERO: LazyLock<Regex> = LazyLock::new(|| pattern(r"\breturn\s+0\s*;"));
static CHECKED_SCANF: LazyLock<Regex> = LazyLock::new(|| pattern(r"if\s*\(\s*scanf\s*\("));
static FFLUSH_STDOUT: LazyLock<Regex> = LazyLock::new(|| pattern(r"fflush\s*\(\s*stdout\s*\)"));
static PRINTF_PERCENT_S: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"printf\s*\(\s*"[^"]*%s[^"]*"\s*,\s*[^)]*\)"#));
static CHAR_ARRAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"char\s+\w+\s*\["));

static LITERAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#));
static GLUED_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(\w+)\s+(?:return|break|continue|goto)\b"));

/// Names the primitive-declaration scan can capture that are never variables.
const TYPE_KEYWORDS: &[&str] = &[
    "int", "float", "double", "char", "long", "short", "unsigned", "signed", "void", "const",
];

/// Scan a C buffer and return its diagnostics in rule order.
pub fn analyze_c(source: &str) -> Vec<Diagnostic> {
    CScan::new(source).run()
}

/// [`Analyzer`] implementation for C buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CAnalyzer;

impl Analyzer for CAnalyzer {
    fn kind(&self) -> SourceKind {
        SourceKind::C
    }

    fn analyze(&self, source: &str) -> Vec<Diagnostic> {
        analyze_c(source)
    }
}

struct CScan<'a> {
    source: &'a str,
    index: LineIndex,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CScan<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            index: LineIndex::from_text(source),
            diagnostics: Vec::new(),
        }
    }

    fn push(&mut self, rule: CRule, message: impl Into<String>, line: Option<usize>) {
        self.diagnostics.push(
            Diagnostic::new(rule.severity(), rule.code(), message).at_optional_line(line),
        );
    }

    /// 1-based line of the first match of `re`.
    fn line_of(&self, re: &Regex) -> Option<usize> {
        re.find(self.source)
            .map(|m| self.index.line_of_offset(m.start()))
    }

    fn run(mut self) -> Vec<Diagnostic> {
        let src = self.source;

        let has_main = MAIN_DECL.is_match(src);
        if !has_main {
            self.push(CRule::MissingMain, "C: missing main function.", None);
        }
        if MAIN_CALL.is_match(src) && !INT_MAIN.is_match(src) {
            self.push(CRule::MainNotInt, "C: main should return int.", None);
        }
        if src.trim().is_empty() {
            self.push(CRule::EmptyFile, "C: empty file.", None);
        }

        if src.matches('{').count() != src.matches('}').count() {
            self.push(CRule::UnbalancedBraces, "C: unbalanced braces.", None);
        }

        self.check_headers();
        self.check_unused_variables();
        self.check_lines();

        let uses_printf = PRINTF.is_match(src);
        if uses_printf && !PRINTF_NEWLINE.is_match(src) {
            let line = self.line_of(&PRINTF);
            self.push(CRule::PrintfNewline, "C: end printf output with \\n.", line);
        }

        let uses_malloc = MALLOC.is_match(src);
        if uses_malloc && !FREE.is_match(src) {
            self.push(
                CRule::MallocWithoutFree,
                "C: malloc without free (memory leak).",
                None,
            );
        }

        if has_main && !RETURN_ZERO.is_match(src) {
            self.push(
                CRule::MissingReturnZero,
                "C: add \"return 0;\" at the end of main.",
                None,
            );
        }

        if GETS.is_match(src) {
            self.push(CRule::Gets, "C: gets() is unsafe, use fgets().", None);
        }
        if SCANF.is_match(src) && !CHECKED_SCANF.is_match(src) {
            self.push(
                CRule::UncheckedScanf,
                "C: check the return value of scanf().",
                None,
            );
        }
        if STRCPY.is_match(src) {
            self.push(
                CRule::Strcpy,
                "C: strcpy() -> prefer strncpy() or memcpy().",
                None,
            );
        }
        if INT_MAIN_VOID.is_match(src) && uses_printf && !FFLUSH_STDOUT.is_match(src) {
            let line = self.line_of(&PRINTF);
            self.push(
                CRule::MissingFflush,
                "C: add fflush(stdout) if output must appear immediately.",
                line,
            );
        }
        if PRINTF_PERCENT_S.is_match(src) && !CHAR_ARRAY.is_match(src) {
            self.push(
                CRule::UnsafePercentS,
                "C: check buffer for %s (size + terminator).",
                None,
            );
        }

        self.diagnostics
    }

    fn check_headers(&mut self) {
        let src = self.source;
        let has_stdio = INCLUDE_STDIO.is_match(src);

        if (PRINTF.is_match(src) || SCANF.is_match(src)) && !has_stdio {
            self.push(CRule::MissingStdio, "C: add #include <stdio.h>.", None);
        }
        if PUTS.is_match(src) && !has_stdio {
            self.push(
                CRule::MissingStdioForPuts,
                "C: add #include <stdio.h> for puts().",
                None,
            );
        }
        if (MALLOC.is_match(src) || FREE.is_match(src)) && !INCLUDE_STDLIB.is_match(src) {
            self.push(CRule::MissingStdlib, "C: add #include <stdlib.h>.", None);
        }
        if (STRLEN.is_match(src) || STRCPY.is_match(src)) && !INCLUDE_STRING.is_match(src) {
            self.push(CRule::MissingString, "C: add #include <string.h>.", None);
        }
    }

    /// A declared name that occurs only once in the buffer is only ever declared.
    fn check_unused_variables(&mut self) {
        let src = self.source;
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for word in WORD.find_iter(src) {
            *occurrences.entry(word.as_str()).or_default() += 1;
        }

        let unused: Vec<(&str, usize)> = DECLARATION
            .captures_iter(src)
            .filter_map(|caps| caps.get(1))
            .filter(|name| name.as_str() != "main" && !TYPE_KEYWORDS.contains(&name.as_str()))
            .filter(|name| occurrences.get(name.as_str()).copied().unwrap_or(0) <= 1)
            .map(|name| (name.as_str(), self.index.line_of_offset(name.start())))
            .collect();

        for (name, line) in unused {
            self.push(
                CRule::UnusedVariable,
                format!("C: unused variable \"{name}\"."),
                Some(line),
            );
        }
    }

    fn check_lines(&mut self) {
        let src = self.source;
        for (idx, line) in src.split('\n').enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
                continue;
            }

            if line.contains('\t') {
                self.push(
                    CRule::TabCharacter,
                    format!("C: tab character on line {line_no}."),
                    Some(line_no),
                );
            }

            if !ends_statement(trimmed) || has_glued_statement(trimmed) {
                self.push(
                    CRule::MissingSemicolon,
                    format!("C: missing semicolon on line {line_no}."),
                    Some(line_no),
                );
            }
        }
    }
}

fn ends_statement(trimmed: &str) -> bool {
    trimmed.ends_with([';', '{', '}', ':'])
}

/// Two statements on one line with no `;` between them, e.g. `int x = 1 return 0;`.
fn has_glued_statement(trimmed: &str) -> bool {
    let code = LITERAL.replace_all(trimmed, "\"\"");
    // Literals are blanked, so any `//` left starts a comment.
    let code = code.split("//").next().unwrap_or_default();
    GLUED_STATEMENT
        .captures_iter(code)
        .filter_map(|caps| caps.get(1))
        .any(|word| !matches!(word.as_str(), "else" | "do"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakelint_core::{Severity, classify};
    use pretty_assertions::assert_eq;

    const VALID: &str = "#include <stdio.h>\nint main(void) {\n  printf(\"hi\\n\");\n  fflush(stdout);\n  return 0;\n}";

    fn codes(source: &str) -> Vec<&'static str> {
        let diags = analyze_c(source);
        CRule::ALL
            .iter()
            .map(|r| r.code())
            .filter(|code| diags.iter().any(|d| d.code.as_deref() == Some(*code)))
            .collect()
    }

    fn find<'a>(diags: &'a [Diagnostic], rule: CRule) -> Option<&'a Diagnostic> {
        diags
            .iter()
            .find(|d| d.code.as_deref() == Some(rule.code()))
    }

    #[test]
    fn test_minimal_valid_program_is_clean() {
        assert_eq!(analyze_c(VALID), vec![]);
    }

    #[test]
    fn test_missing_semicolon_glued_statement() {
        let diags = analyze_c("int main(void) { int x = 1 return 0; }");
        let semicolon = find(&diags, CRule::MissingSemicolon).expect("missing semicolon");
        assert_eq!(semicolon.line, Some(1));
        assert_eq!(semicolon.message, "C: missing semicolon on line 1.");
    }

    #[test]
    fn test_missing_semicolon_line_end() {
        let source = "#include <stdio.h>\nint main(void) {\n  int x = 1\n  return x;\n}";
        let diags = analyze_c(source);
        let lines: Vec<Option<usize>> = diags
            .iter()
            .filter(|d| d.code.as_deref() == Some("C011"))
            .map(|d| d.line)
            .collect();
        assert_eq!(lines, vec![Some(3)]);
    }

    #[test]
    fn test_glued_statement_ignores_else_and_strings() {
        assert!(!has_glued_statement("else return 0;"));
        assert!(!has_glued_statement("if (x) return 0;"));
        assert!(!has_glued_statement("puts(\"x return y\");"));
        assert!(has_glued_statement("x = 1 return 0;"));
        assert!(!has_glued_statement("total++ break;"));
        assert!(has_glued_statement("y = x break;"));
    }

    #[test]
    fn test_trailing_comment_is_not_a_statement() {
        assert!(!has_glued_statement("n++; // then return;"));
        assert!(!has_glued_statement("puts(\"a // b\"); // done return"));
        assert!(has_glued_statement("x = 1 return 0; // note"));

        let source = "int main(void) {\n  int n = 0;\n  n++; // then return;\n  return n;\n}";
        assert!(
            analyze_c(source)
                .iter()
                .all(|d| d.code.as_deref() != Some("C011"))
        );
    }

    #[test]
    fn test_empty_source() {
        let diags = analyze_c("");
        assert_eq!(codes(""), vec!["C001", "C003"]);
        assert!(diags.iter().all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn test_main_must_return_int() {
        let source = "void main(void) {\n  return;\n}";
        assert!(codes(source).contains(&"C002"));
        assert!(!codes(source).contains(&"C001"));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(codes("int main(void) {\n  return 0;\n").contains(&"C004"));
    }

    #[test]
    fn test_header_inference() {
        let source = "int main(void) {\n  char *p = malloc(4);\n  strcpy(p, \"ab\");\n  puts(p);\n  free(p);\n  return 0;\n}";
        let found = codes(source);
        assert!(found.contains(&"C006"));
        assert!(found.contains(&"C007"));
        assert!(found.contains(&"C008"));
        assert!(found.contains(&"C017"));
        assert!(!found.contains(&"C005"));
        assert!(!found.contains(&"C013"));
    }

    #[test]
    fn test_unused_variable_anchored_at_declaration() {
        let source = "#include <stdio.h>\nint main(void) {\n  int used = 1;\n  unsigned long idle = 2;\n  return used;\n}";
        let diags = analyze_c(source);
        let unused: Vec<(&str, Option<usize>)> = diags
            .iter()
            .filter(|d| d.code.as_deref() == Some("C009"))
            .map(|d| (d.message.as_str(), d.line))
            .collect();
        assert_eq!(unused, vec![("C: unused variable \"idle\".", Some(4))]);
    }

    #[test]
    fn test_tab_character() {
        let source = "int main(void) {\n\treturn 0;\n}";
        let diags = analyze_c(source);
        let tab = find(&diags, CRule::TabCharacter).expect("tab");
        assert_eq!(tab.line, Some(2));
        assert_eq!(tab.message, "C: tab character on line 2.");
    }

    #[test]
    fn test_printf_checks_anchor_first_printf() {
        let source = "#include <stdio.h>\n\nint main(void) {\n  printf(\"hi\");\n  return 0;\n}";
        let diags = analyze_c(source);
        assert_eq!(find(&diags, CRule::PrintfNewline).unwrap().line, Some(4));
        assert_eq!(find(&diags, CRule::MissingFflush).unwrap().line, Some(4));
    }

    #[test]
    fn test_printf_with_arguments_and_newline() {
        let source = "#include <stdio.h>\nint main(void) {\n  int n = 2;\n  printf(\"%d\\n\", n);\n  fflush(stdout);\n  return 0;\n}";
        assert_eq!(analyze_c(source), vec![]);
    }

    #[test]
    fn test_malloc_without_free() {
        let source = "#include <stdlib.h>\nint main(void) {\n  char *p = malloc(4);\n  p[0] = 0;\n  return 0;\n}";
        assert!(codes(source).contains(&"C013"));
    }

    #[test]
    fn test_monotonic_fix_return_zero() {
        let broken = "#include <stdio.h>\nint main(void) {\n  printf(\"hi\\n\");\n  fflush(stdout);\n}";
        let before = analyze_c(broken);
        assert_eq!(
            before.iter().map(|d| d.code.as_deref()).collect::<Vec<_>>(),
            vec![Some("C014")]
        );
        assert_eq!(analyze_c(VALID), vec![]);
    }

    #[test]
    fn test_security_checks() {
        let source = "#include <stdio.h>\nint main(void) {\n  char buf[8];\n  gets(buf);\n  scanf(\"%7s\", buf);\n  printf(\"%s\\n\", buf);\n  fflush(stdout);\n  return 0;\n}";
        let found = codes(source);
        assert!(found.contains(&"C015"));
        assert!(found.contains(&"C016"));
        // A char array exists, so %s is not flagged.
        assert!(!found.contains(&"C019"));
    }

    #[test]
    fn test_checked_scanf_and_unsafe_percent_s() {
        let source = "#include <stdio.h>\nint main(void) {\n  char *name = 0;\n  if (scanf(\"%d\", &name)) {\n    printf(\"%s\\n\", name);\n  }\n  fflush(stdout);\n  return 0;\n}";
        let found = codes(source);
        assert!(!found.contains(&"C016"));
        assert!(found.contains(&"C019"));
    }

    #[test]
    fn test_severity_matches_classifier() {
        let sources = [
            "",
            "void main() {\n\tgets(b)\n",
            "int main(void) {\n  char *p = malloc(4);\n  strcpy(p, \"x\");\n  scanf(\"%d\", p);\n  printf(\"%s\", p);\n  puts(p);\n  int lonely = 1 return 0;\n",
        ];
        for source in sources {
            for diag in analyze_c(source) {
                assert_eq!(diag.severity, classify(&diag.message), "{}", diag.message);
            }
        }
    }

    #[test]
    fn test_every_rule_has_a_distinct_code() {
        let mut codes: Vec<&str> = CRule::ALL.iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CRule::ALL.len());
    }
}
