//! Rule catalogue for the buildconf analyzer.

use bakelint_core::Severity;

macro_rules! buildconf_rules {
    ($($variant:ident => $code:literal, $severity:ident;)*) => {
        /// Every check the buildconf analyzer performs.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BuildconfRule {
            $(
                #[allow(missing_docs)]
                $variant,
            )*
        }

        impl BuildconfRule {
            /// All rules, in code order.
            pub const ALL: &'static [BuildconfRule] = &[$(BuildconfRule::$variant),*];

            /// Stable rule code.
            pub fn code(self) -> &'static str {
                match self {
                    $(BuildconfRule::$variant => $code,)*
                }
            }

            /// Severity attached to the rule's diagnostics.
            pub fn severity(self) -> Severity {
                match self {
                    $(BuildconfRule::$variant => Severity::$severity,)*
                }
            }
        }
    };
}

buildconf_rules! {
    HeaderNotFirst => "B001", Error;
    MissingHeader => "B002", Error;
    InvalidHeader => "B003", Error;
    DuplicateHeader => "B004", Warning;

    MissingWorkspace => "B010", Error;
    MultipleWorkspaces => "B011", Error;
    MissingWorkspaceKey => "B012", Error;
    RootNotDot => "B013", Suggestion;
    TargetDirNotTarget => "B014", Suggestion;
    AbsoluteTargetDir => "B015", Error;
    UndeclaredProfile => "B016", Error;

    MissingTool => "B020", Error;
    MissingBake => "B021", Error;
    MissingRun => "B022", Error;
    MissingExec => "B023", Error;
    DuplicateTool => "B024", Error;
    DuplicateBake => "B025", Error;
    UnusedTool => "B026", Error;
    UndeclaredTool => "B027", Error;

    BakeWithoutMake => "B030", Error;
    BakeWithoutRun => "B031", Error;
    BakeWithoutOutput => "B032", Error;
    SeveralOutputs => "B033", Suggestion;
    UnknownBakeDirective => "B034", Warning;
    BakeNotSnakeCase => "B035", Suggestion;
    DuplicateMakeId => "B036", Warning;

    OutputOutsideTarget => "B040", Error;
    OutputWithoutExtension => "B041", Error;
    OutputWithWhitespace => "B042", Warning;
    DuplicateOutput => "B043", Warning;

    ToolWithoutExec => "B050", Error;
    ToolNameMismatch => "B051", Error;
    UnknownToolDirective => "B052", Error;
    EmptyExec => "B053", Warning;
    ExecWithSpaces => "B054", Suggestion;
    RelativeExec => "B055", Suggestion;

    RunWithoutIo => "B060", Error;
    TakesWithoutEmits => "B061", Error;
    RunWithoutFlags => "B062", Error;
    UnknownRunDirective => "B063", Error;
    RunOutsideBake => "B064", Error;

    UnreferencedBake => "B070", Warning;
    NoExport => "B071", Warning;
    DanglingRef => "B072", Warning;
    DanglingNeeds => "B073", Warning;

    UnknownMakeKind => "B080", Warning;
    EmptyMakePattern => "B081", Warning;
    UnquotedMakePattern => "B082", Warning;
    UnknownTakesId => "B083", Warning;
    TakesFlagShape => "B084", Warning;
    UnknownEmitsPort => "B085", Warning;
    EmitsFlagShape => "B086", Warning;
    OutputsWithoutEmits => "B087", Warning;

    TabCharacter => "B090", Error;
    UnknownBlock => "B091", Warning;
    UnbalancedBlocks => "B092", Warning;
}
