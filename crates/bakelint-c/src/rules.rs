//! Rule catalogue for the C analyzer.

use bakelint_core::Severity;

/// Every check the C analyzer performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CRule {
    MissingMain,
    MainNotInt,
    EmptyFile,
    UnbalancedBraces,
    MissingStdio,
    MissingStdioForPuts,
    MissingStdlib,
    MissingString,
    UnusedVariable,
    TabCharacter,
    MissingSemicolon,
    PrintfNewline,
    MallocWithoutFree,
    MissingReturnZero,
    Gets,
    UncheckedScanf,
    Strcpy,
    MissingFflush,
    UnsafePercentS,
}

impl CRule {
    /// All rules, in the order the analyzer runs them.
    pub const ALL: [CRule; 19] = [
        CRule::MissingMain,
        CRule::MainNotInt,
        CRule::EmptyFile,
        CRule::UnbalancedBraces,
        CRule::MissingStdio,
        CRule::MissingStdioForPuts,
        CRule::MissingStdlib,
        CRule::MissingString,
        CRule::UnusedVariable,
        CRule::TabCharacter,
        CRule::MissingSemicolon,
        CRule::PrintfNewline,
        CRule::MallocWithoutFree,
        CRule::MissingReturnZero,
        CRule::Gets,
        CRule::UncheckedScanf,
        CRule::Strcpy,
        CRule::MissingFflush,
        CRule::UnsafePercentS,
    ];

    /// Stable rule code.
    pub fn code(self) -> &'static str {
        match self {
            CRule::MissingMain => "C001",
            CRule::MainNotInt => "C002",
            CRule::EmptyFile => "C003",
            CRule::UnbalancedBraces => "C004",
            CRule::MissingStdio => "C005",
            CRule::MissingStdioForPuts => "C006",
            CRule::MissingStdlib => "C007",
            CRule::MissingString => "C008",
            CRule::UnusedVariable => "C009",
            CRule::TabCharacter => "C010",
            CRule::MissingSemicolon => "C011",
            CRule::PrintfNewline => "C012",
            CRule::MallocWithoutFree => "C013",
            CRule::MissingReturnZero => "C014",
            CRule::Gets => "C015",
            CRule::UncheckedScanf => "C016",
            CRule::Strcpy => "C017",
            CRule::MissingFflush => "C018",
            CRule::UnsafePercentS => "C019",
        }
    }

    /// Severity attached to the rule's diagnostics.
    pub fn severity(self) -> Severity {
        match self {
            CRule::MissingMain | CRule::EmptyFile | CRule::UnbalancedBraces => Severity::Error,
            _ => Severity::Warning,
        }
    }
}
