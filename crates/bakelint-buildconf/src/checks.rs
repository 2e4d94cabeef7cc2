//! The buildconf check catalogue.
//!
//! Every check is a query over the parsed [`Document`] that appends to a shared [`Findings`]
//! sink. Checks never depend on each other's output.

use crate::document::{Block, Directive, Document};
use crate::lexer::{KNOWN_TAGS, LineKind};
use crate::rules::BuildconfRule;
use bakelint_core::Diagnostic;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("static buildconf pattern must compile")
}

static SNAKE_CASE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[a-z0-9_]+$"));
static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| pattern(r"\.[a-zA-Z0-9]+$"));

const WORKSPACE_KEYS: &[&str] = &["name", "root", "target_dir", "profile"];
const MAKE_KINDS: &[&str] = &["cglob", "glob", "file", "list"];
const TOOL_DIRECTIVES: &[&str] = &["exec"];
// `.takes`, `.set` and `.emits` belong to nested runs but are tolerated on a bake.
const BAKE_DIRECTIVES: &[&str] = &["make", "needs", "output", "takes", "set", "emits"];
const RUN_DIRECTIVES: &[&str] = &["takes", "emits", "set", "include", "define", "libdir", "lib"];
const OUTPUT_DIR: &str = "target/out/";

#[derive(Default)]
pub(crate) struct Findings {
    diagnostics: Vec<Diagnostic>,
}

impl Findings {
    fn push(&mut self, rule: BuildconfRule, message: impl Into<String>, line: Option<usize>) {
        self.diagnostics.push(
            Diagnostic::new(rule.severity(), rule.code(), message).at_optional_line(line),
        );
    }

    fn at(&mut self, rule: BuildconfRule, message: impl Into<String>, line: usize) {
        self.push(rule, message, Some(line));
    }

    fn global(&mut self, rule: BuildconfRule, message: impl Into<String>) {
        self.push(rule, message, None);
    }
}

/// Run every check over `doc`, in catalogue order.
pub(crate) fn run_all(doc: &Document<'_>) -> Vec<Diagnostic> {
    let mut out = Findings::default();
    check_header(doc, &mut out);
    check_workspace(doc, &mut out);
    check_presence(doc, &mut out);
    check_bakes(doc, &mut out);
    check_outputs(doc, &mut out);
    check_tools(doc, &mut out);
    check_runs(doc, &mut out);
    check_references(doc, &mut out);
    check_make(doc, &mut out);
    check_takes_emits(doc, &mut out);
    check_layout(doc, &mut out);
    out.diagnostics
}

fn check_header(doc: &Document<'_>, out: &mut Findings) {
    let first = doc.meaningful_lines().next();

    if first.is_none_or(|l| l.trimmed() != "!muf 4") {
        if let Some(line) = first {
            out.at(
                BuildconfRule::HeaderNotFirst,
                "buildconf: !muf 4 must be the first meaningful line.",
                line.number,
            );
        }
        out.global(
            BuildconfRule::MissingHeader,
            "buildconf: missing !muf 4 header.",
        );
    }

    let mut valid_headers = doc
        .lines
        .iter()
        .filter(|l| l.kind == LineKind::Header { valid: true });
    if valid_headers.next().is_none() {
        out.global(
            BuildconfRule::InvalidHeader,
            "buildconf: invalid header line (expected !muf 4).",
        );
    }
    for duplicate in valid_headers {
        out.at(
            BuildconfRule::DuplicateHeader,
            "buildconf: duplicate !muf 4 header.",
            duplicate.number,
        );
    }
}

fn check_workspace(doc: &Document<'_>, out: &mut Findings) {
    let workspaces = doc.blocks_tagged("workspace");
    let declared_profiles: HashSet<&str> = doc
        .blocks_tagged("profile")
        .iter()
        .filter_map(|b| b.name)
        .collect();

    match workspaces.as_slice() {
        [] => out.global(
            BuildconfRule::MissingWorkspace,
            "buildconf: missing [workspace] block.",
        ),
        [_, second, ..] => out.at(
            BuildconfRule::MultipleWorkspaces,
            "buildconf: multiple [workspace] blocks.",
            second.line,
        ),
        [_] => {}
    }

    for workspace in &workspaces {
        for key in WORKSPACE_KEYS {
            if !workspace
                .directives_named("set")
                .any(|d| d.keyword_at(0, key))
            {
                out.at(
                    BuildconfRule::MissingWorkspaceKey,
                    format!("buildconf: workspace is missing .set {key}."),
                    workspace.line,
                );
            }
        }

        for set in workspace.directives_named("set") {
            let Some(value) = set.arg(1) else { continue };
            if set.keyword_at(0, "root") {
                if value != "." {
                    out.at(
                        BuildconfRule::RootNotDot,
                        "buildconf: .set root \".\" is recommended.",
                        set.line,
                    );
                }
            } else if set.keyword_at(0, "target_dir") {
                if value != "target" {
                    out.at(
                        BuildconfRule::TargetDirNotTarget,
                        "buildconf: .set target_dir \"target\" is recommended.",
                        set.line,
                    );
                }
                if value.starts_with('/') {
                    out.at(
                        BuildconfRule::AbsoluteTargetDir,
                        "buildconf: target_dir must be a relative path.",
                        set.line,
                    );
                }
            } else if set.keyword_at(0, "profile") && !declared_profiles.contains(value) {
                out.at(
                    BuildconfRule::UndeclaredProfile,
                    format!(
                        "buildconf: profile \"{value}\" is not declared by any [profile] block."
                    ),
                    set.line,
                );
            }
        }
    }
}

fn check_presence(doc: &Document<'_>, out: &mut Findings) {
    let tools = named_blocks(doc, "tool");
    let bakes = named_blocks(doc, "bake");
    let runs = named_blocks(doc, "run");

    if tools.is_empty() {
        out.global(
            BuildconfRule::MissingTool,
            "buildconf: missing [tool <name>] block.",
        );
    }
    if bakes.is_empty() {
        out.global(
            BuildconfRule::MissingBake,
            "buildconf: missing [bake <name>] block.",
        );
    }
    if runs.is_empty() {
        out.global(
            BuildconfRule::MissingRun,
            "buildconf: missing [run <tool>] block.",
        );
    }
    if doc.directives_named("exec").is_empty() {
        out.global(
            BuildconfRule::MissingExec,
            "buildconf: missing .exec in tool.",
        );
    }

    for (name, line) in duplicates(&tools) {
        out.at(
            BuildconfRule::DuplicateTool,
            format!("buildconf: duplicate tool \"{name}\"."),
            line,
        );
    }
    for (name, line) in duplicates(&bakes) {
        out.at(
            BuildconfRule::DuplicateBake,
            format!("buildconf: duplicate bake \"{name}\"."),
            line,
        );
    }

    let used_tools: HashSet<&str> = runs.iter().map(|(name, _)| *name).collect();
    for (name, line) in &tools {
        if !used_tools.contains(name) {
            out.at(
                BuildconfRule::UnusedTool,
                format!("buildconf: tool \"{name}\" is never used by a [run] block."),
                *line,
            );
        }
    }
    let declared_tools: HashSet<&str> = tools.iter().map(|(name, _)| *name).collect();
    for (name, line) in &runs {
        if !declared_tools.contains(name) {
            out.at(
                BuildconfRule::UndeclaredTool,
                format!("buildconf: run uses undeclared tool \"{name}\"."),
                *line,
            );
        }
    }
}

fn check_bakes(doc: &Document<'_>, out: &mut Findings) {
    for bake in doc.blocks_tagged("bake") {
        let Some(name) = bake.name else { continue };

        if !bake.has_directive("make") {
            out.at(
                BuildconfRule::BakeWithoutMake,
                format!("buildconf: bake \"{name}\" has no .make."),
                bake.line,
            );
        }
        if !bake.children.iter().any(|c| c.tag == "run") {
            out.at(
                BuildconfRule::BakeWithoutRun,
                format!("buildconf: bake \"{name}\" has no [run <tool>] block."),
                bake.line,
            );
        }
        match bake.directives_named("output").count() {
            0 => out.at(
                BuildconfRule::BakeWithoutOutput,
                format!("buildconf: bake \"{name}\" has no .output."),
                bake.line,
            ),
            1 => {}
            _ => out.at(
                BuildconfRule::SeveralOutputs,
                format!(
                    "buildconf: bake \"{name}\" declares several .output (one per bake is recommended)."
                ),
                bake.line,
            ),
        }
        if !SNAKE_CASE.is_match(name) {
            out.at(
                BuildconfRule::BakeNotSnakeCase,
                format!("buildconf: bake \"{name}\" should use snake_case."),
                bake.line,
            );
        }

        for directive in unknown_directives(bake, BAKE_DIRECTIVES) {
            out.at(
                BuildconfRule::UnknownBakeDirective,
                format!(
                    "buildconf: bake \"{name}\" contains unknown directive .{}.",
                    directive.name
                ),
                directive.line,
            );
        }

        let mut seen = HashSet::new();
        for make in bake.directives_named("make") {
            let Some(id) = make.arg(0) else { continue };
            if !seen.insert(id) {
                out.at(
                    BuildconfRule::DuplicateMakeId,
                    format!(
                        "buildconf: bake \"{name}\" declares .make \"{id}\" more than once."
                    ),
                    make.line,
                );
            }
        }
    }
}

fn check_outputs(doc: &Document<'_>, out: &mut Findings) {
    let mut seen = HashSet::new();
    for output in doc.directives_named("output") {
        let Some(path) = output.arg(1) else { continue };

        if !path.starts_with(OUTPUT_DIR) {
            out.at(
                BuildconfRule::OutputOutsideTarget,
                format!("buildconf: output \"{path}\" must live under {OUTPUT_DIR}."),
                output.line,
            );
        }
        if !FILE_EXTENSION.is_match(path) {
            out.at(
                BuildconfRule::OutputWithoutExtension,
                format!("buildconf: output \"{path}\" has no file extension."),
                output.line,
            );
        }
        if path.chars().any(char::is_whitespace) {
            out.at(
                BuildconfRule::OutputWithWhitespace,
                format!("buildconf: output \"{path}\" contains whitespace."),
                output.line,
            );
        }
        if !seen.insert(path) {
            out.at(
                BuildconfRule::DuplicateOutput,
                format!("buildconf: duplicate output \"{path}\"."),
                output.line,
            );
        }
    }
}

fn check_tools(doc: &Document<'_>, out: &mut Findings) {
    for tool in doc.blocks_tagged("tool") {
        let Some(name) = tool.name else { continue };

        match tool.directives_named("exec").next() {
            None => out.at(
                BuildconfRule::ToolWithoutExec,
                format!("buildconf: tool \"{name}\" has no .exec."),
                tool.line,
            ),
            Some(exec) => {
                let command = exec_command(exec);
                let binary = command.rsplit('/').next().unwrap_or_default();
                if !binary.is_empty() && binary != name {
                    out.at(
                        BuildconfRule::ToolNameMismatch,
                        format!(
                            "buildconf: tool \"{name}\" should be named after its binary \"{binary}\"."
                        ),
                        exec.line,
                    );
                }
            }
        }

        for directive in unknown_directives(tool, TOOL_DIRECTIVES) {
            out.at(
                BuildconfRule::UnknownToolDirective,
                format!(
                    "buildconf: tool \"{name}\" contains unknown directive .{}.",
                    directive.name
                ),
                directive.line,
            );
        }
    }

    for exec in doc.directives_named("exec") {
        let command = exec_command(exec);
        if command.is_empty() {
            out.at(
                BuildconfRule::EmptyExec,
                "buildconf: empty .exec.",
                exec.line,
            );
            continue;
        }
        if command.contains(' ') {
            out.at(
                BuildconfRule::ExecWithSpaces,
                format!("buildconf: .exec \"{command}\" contains spaces (prefer a single binary)."),
                exec.line,
            );
        }
        if command.starts_with("./") || command.starts_with("../") {
            out.at(
                BuildconfRule::RelativeExec,
                format!("buildconf: .exec \"{command}\" is relative (prefer a binary on PATH)."),
                exec.line,
            );
        }
    }
}

fn check_runs(doc: &Document<'_>, out: &mut Findings) {
    for run in doc.blocks_tagged("run") {
        let Some(tool) = run.name else { continue };
        let takes = run.has_directive("takes");
        let emits = run.has_directive("emits");

        if !takes && !emits {
            out.at(
                BuildconfRule::RunWithoutIo,
                format!("buildconf: run \"{tool}\" has neither .takes nor .emits."),
                run.line,
            );
        } else if takes && !emits {
            out.at(
                BuildconfRule::TakesWithoutEmits,
                format!("buildconf: run \"{tool}\" has .takes without .emits."),
                run.line,
            );
        }
        if !run.has_directive("set") {
            out.at(
                BuildconfRule::RunWithoutFlags,
                format!("buildconf: run \"{tool}\" has no .set (flags)."),
                run.line,
            );
        }
        for directive in unknown_directives(run, RUN_DIRECTIVES) {
            out.at(
                BuildconfRule::UnknownRunDirective,
                format!(
                    "buildconf: run \"{tool}\" contains unknown directive .{}.",
                    directive.name
                ),
                directive.line,
            );
        }
        if run.parent_tag != Some("bake") {
            out.at(
                BuildconfRule::RunOutsideBake,
                format!("buildconf: run \"{tool}\" must be nested inside a [bake] block."),
                run.line,
            );
        }
    }
}

fn check_references(doc: &Document<'_>, out: &mut Findings) {
    let bakes = named_blocks(doc, "bake");
    let declared: HashSet<&str> = bakes.iter().map(|(name, _)| *name).collect();
    let refs = doc.directives_named("ref");
    let needs = doc.directives_named("needs");

    let referenced: HashSet<&str> = refs
        .iter()
        .chain(needs.iter())
        .flat_map(|d| d.args.iter().map(|a| a.text))
        .collect();
    for (name, line) in &bakes {
        if !referenced.contains(name) {
            out.at(
                BuildconfRule::UnreferencedBake,
                format!("buildconf: bake \"{name}\" is not referenced (export/needs)."),
                *line,
            );
        }
    }

    let exported = doc
        .blocks_tagged("export")
        .iter()
        .any(|b| b.directives_named("ref").any(|d| !d.args.is_empty()));
    if !exported {
        let header = doc
            .lines
            .iter()
            .find(|l| matches!(l.kind, LineKind::Header { .. }))
            .map(|l| l.number);
        out.push(
            BuildconfRule::NoExport,
            "buildconf: no exported recipe ([export] block).",
            header,
        );
    }

    for (directives, rule, label) in [
        (&refs, BuildconfRule::DanglingRef, "ref"),
        (&needs, BuildconfRule::DanglingNeeds, "needs"),
    ] {
        for directive in directives {
            for target in &directive.args {
                if !declared.contains(target.text) {
                    out.at(
                        rule,
                        format!(
                            "buildconf: .{label} \"{}\" does not match any bake.",
                            target.text
                        ),
                        directive.line,
                    );
                }
            }
        }
    }
}

fn check_make(doc: &Document<'_>, out: &mut Findings) {
    let mut reported_unquoted = false;
    for make in doc.directives_named("make") {
        if let Some(kind) = make.arg(1) {
            if !MAKE_KINDS.contains(&kind) {
                out.at(
                    BuildconfRule::UnknownMakeKind,
                    format!("buildconf: unknown .make kind \"{kind}\"."),
                    make.line,
                );
            }
        }

        match make.args.get(2) {
            Some(pattern) if !pattern.quoted => {
                if !reported_unquoted {
                    reported_unquoted = true;
                    out.at(
                        BuildconfRule::UnquotedMakePattern,
                        "buildconf: .make patterns should be quoted.",
                        make.line,
                    );
                }
            }
            Some(pattern) if !pattern.text.trim().is_empty() => {}
            _ => out.at(
                BuildconfRule::EmptyMakePattern,
                "buildconf: .make with empty pattern.",
                make.line,
            ),
        }
    }
}

fn check_takes_emits(doc: &Document<'_>, out: &mut Findings) {
    let make_ids: HashSet<&str> = doc
        .directives_named("make")
        .iter()
        .filter_map(|d| d.arg(0))
        .collect();
    let outputs = doc.directives_named("output");
    let ports: HashSet<&str> = outputs.iter().filter_map(|d| d.arg(0)).collect();
    let emits = doc.directives_named("emits");

    for takes in doc.directives_named("takes") {
        if !takes.keyword_at(1, "as") {
            continue;
        }
        if let Some(id) = takes.arg(0) {
            if !make_ids.contains(id) {
                out.at(
                    BuildconfRule::UnknownTakesId,
                    format!("buildconf: .takes \"{id}\" does not match any .make."),
                    takes.line,
                );
            }
        }
        if let Some(flag) = takes.arg(2) {
            if !flag.starts_with('-') && flag != "@args" {
                out.at(
                    BuildconfRule::TakesFlagShape,
                    format!(
                        "buildconf: .takes flag \"{flag}\" should start with \"-\" or be @args."
                    ),
                    takes.line,
                );
            }
        }
    }

    for emit in &emits {
        if !emit.keyword_at(1, "as") {
            continue;
        }
        if let Some(port) = emit.arg(0) {
            if !ports.contains(port) {
                out.at(
                    BuildconfRule::UnknownEmitsPort,
                    format!("buildconf: .emits \"{port}\" does not match any .output."),
                    emit.line,
                );
            }
        }
        if let Some(flag) = emit.arg(2) {
            if !flag.starts_with('-') {
                out.at(
                    BuildconfRule::EmitsFlagShape,
                    format!("buildconf: .emits flag \"{flag}\" should start with \"-\"."),
                    emit.line,
                );
            }
        }
    }

    if !outputs.is_empty() && emits.is_empty() {
        out.global(
            BuildconfRule::OutputsWithoutEmits,
            "buildconf: outputs declared without any .emits.",
        );
    }
}

fn check_layout(doc: &Document<'_>, out: &mut Findings) {
    for line in &doc.lines {
        if let LineKind::Open { tag, .. } = line.kind {
            if !KNOWN_TAGS.contains(&tag) {
                out.at(
                    BuildconfRule::UnknownBlock,
                    format!("buildconf: unknown block [{tag}]."),
                    line.number,
                );
            }
        }
    }

    if let Some(line) = doc.lines.iter().find(|l| l.raw.contains('\t')) {
        out.at(
            BuildconfRule::TabCharacter,
            "buildconf: tab characters are not allowed (use spaces).",
            line.number,
        );
    }

    let opens = doc
        .lines
        .iter()
        .filter(|l| l.trimmed().starts_with('['))
        .count();
    let closes = doc
        .lines
        .iter()
        .filter(|l| l.kind == LineKind::Close)
        .count();
    if opens != closes {
        out.global(
            BuildconfRule::UnbalancedBlocks,
            "buildconf: unbalanced blocks (missing ..).",
        );
    }
}

/// `(name, line)` of every named block tagged `tag`.
fn named_blocks<'a>(doc: &Document<'a>, tag: &str) -> Vec<(&'a str, usize)> {
    doc.blocks_tagged(tag)
        .into_iter()
        .filter_map(|b| b.name.map(|name| (name, b.line)))
        .collect()
}

/// Every repeat occurrence after the first.
fn duplicates<'a>(named: &[(&'a str, usize)]) -> Vec<(&'a str, usize)> {
    let mut seen = HashSet::new();
    named
        .iter()
        .filter(|(name, _)| !seen.insert(*name))
        .copied()
        .collect()
}

fn unknown_directives<'b, 'a>(
    block: &'b Block<'a>,
    allowed: &'b [&str],
) -> impl Iterator<Item = &'b Directive<'a>> {
    block
        .directives
        .iter()
        .filter(move |d| !allowed.contains(&d.name))
}

/// The command an `.exec` runs: its arguments joined, quotes stripped.
fn exec_command(exec: &Directive<'_>) -> String {
    exec.args
        .iter()
        .map(|a| a.text)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
