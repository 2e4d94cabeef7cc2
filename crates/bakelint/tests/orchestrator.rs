use bakelint::defaults::{DEFAULT_BUILDCONF_SOURCE, DEFAULT_C_SOURCE};
use bakelint::{BufferState, BuildStatus, MemoryEditor, Orchestrator};
use bakelint_core::{Analyzer, Diagnostic, LintConfig, MarkerSeverity, Severity, SourceKind};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn shared(text: &str) -> Arc<Mutex<MemoryEditor>> {
    Arc::new(Mutex::new(MemoryEditor::new(text)))
}

#[test]
fn starts_clean_on_the_starter_buffers() {
    let orchestrator = Orchestrator::default();
    for kind in SourceKind::ALL {
        let document = orchestrator.document(kind);
        assert_eq!(document.state(), BufferState::Clean);
        assert_eq!(document.version(), 0);
        assert!(document.result().is_empty(), "{kind} starter is not clean");
    }
    assert_eq!(
        orchestrator.document(SourceKind::C).buffer().text(),
        DEFAULT_C_SOURCE
    );
    assert_eq!(
        orchestrator.document(SourceKind::Buildconf).buffer().text(),
        DEFAULT_BUILDCONF_SOURCE
    );
}

#[test]
fn attach_registers_profile_and_publishes_markers() {
    let editor = shared("int main(void) {\n\tint x = 1\n  return 0;\n}");
    let mut orchestrator = Orchestrator::default();
    orchestrator
        .attach(SourceKind::C, Box::new(editor.clone()))
        .unwrap();

    let editor = editor.lock().unwrap();
    assert_eq!(editor.language(), Some("c"));
    assert!(editor.completion_count() > 0);
    assert_eq!(editor.marker_updates(), 1);

    let markers = editor.markers();
    assert_eq!(markers.len(), 3);
    assert!(
        markers
            .iter()
            .all(|m| m.line == 2 && m.severity == MarkerSeverity::Warning)
    );
    let messages: Vec<&str> = markers.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "C: unused variable \"x\".",
            "C: tab character on line 2.",
            "C: missing semicolon on line 2.",
        ]
    );
    assert_eq!(markers[1].end_column, "\tint x = 1".chars().count() + 1);
    assert!(orchestrator.document(SourceKind::C).is_attached());
}

#[test]
fn handle_change_reanalyzes_the_editor_text() {
    let editor = shared(DEFAULT_C_SOURCE);
    let mut orchestrator = Orchestrator::default();
    assert!(orchestrator.handle_change(SourceKind::C).is_none());

    orchestrator
        .attach(SourceKind::C, Box::new(editor.clone()))
        .unwrap();
    assert!(orchestrator.analysis(SourceKind::C).is_empty());

    editor.lock().unwrap().edit("void main(void) {}");
    let result = orchestrator.handle_change(SourceKind::C).unwrap();
    assert!(
        result
            .iter()
            .any(|d| d.message == "C: main should return int.")
    );
    assert_eq!(orchestrator.document(SourceKind::C).version(), 2);
    assert_eq!(editor.lock().unwrap().marker_updates(), 2);
}

#[test]
fn suggestions_become_info_markers() {
    let source = DEFAULT_BUILDCONF_SOURCE
        .replace("[bake build]", "[bake Build]")
        .replace(".ref build", ".ref Build");
    let editor = shared(&source);
    let mut orchestrator = Orchestrator::default();
    orchestrator
        .attach(SourceKind::Buildconf, Box::new(editor.clone()))
        .unwrap();

    let editor = editor.lock().unwrap();
    assert_eq!(editor.language(), Some("buildconf"));
    let markers = editor.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].severity, MarkerSeverity::Info);
    assert_eq!(markers[0].code.as_deref(), Some("B035"));
    assert_eq!(markers[0].column, 1);
}

#[test]
fn unanchored_diagnostics_publish_no_marker() {
    let editor = shared("");
    let mut orchestrator = Orchestrator::default();
    let result = orchestrator
        .attach(SourceKind::C, Box::new(editor.clone()))
        .unwrap();
    assert!(result.has_errors());
    assert!(editor.lock().unwrap().markers().is_empty());
}

#[test]
fn reset_pushes_starter_text_to_the_editor() {
    let editor = shared("int x;");
    let mut orchestrator = Orchestrator::default();
    orchestrator
        .attach(SourceKind::C, Box::new(editor.clone()))
        .unwrap();
    assert!(!orchestrator.analysis(SourceKind::C).is_empty());

    assert!(orchestrator.reset(SourceKind::C).is_empty());
    let editor = editor.lock().unwrap();
    assert!(editor.markers().is_empty());
    assert_eq!(bakelint::EditorAdapter::text(&*editor), DEFAULT_C_SOURCE);
}

#[test]
fn detach_stops_marker_publication() {
    let editor = shared(DEFAULT_C_SOURCE);
    let mut orchestrator = Orchestrator::default();
    orchestrator
        .attach(SourceKind::C, Box::new(editor.clone()))
        .unwrap();
    assert!(orchestrator.detach(SourceKind::C).is_some());

    orchestrator.set_source(SourceKind::C, "int x;");
    assert_eq!(editor.lock().unwrap().marker_updates(), 1);
    assert!(orchestrator.handle_change(SourceKind::C).is_none());
}

#[test]
fn subscribers_see_every_pass() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut orchestrator = Orchestrator::default();
    let sink = seen.clone();
    orchestrator.subscribe(move |update| {
        sink.lock()
            .unwrap()
            .push((update.kind, update.version, update.result.len()));
    });

    orchestrator.set_source(SourceKind::C, "void main(void) {}");
    orchestrator.set_source(SourceKind::Buildconf, "");
    orchestrator.run_analysis(SourceKind::C);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!((seen[0].0, seen[0].1), (SourceKind::C, 1));
    assert_eq!((seen[1].0, seen[1].1), (SourceKind::Buildconf, 1));
    assert_eq!((seen[2].0, seen[2].1), (SourceKind::C, 1));
    assert!(seen.iter().all(|&(_, _, len)| len > 0));
}

#[test]
fn combined_is_sorted_with_unanchored_last() {
    let mut orchestrator = Orchestrator::default();
    orchestrator.set_source(SourceKind::C, "int main(void) {\n\tint x = 1\n}");
    orchestrator.set_source(SourceKind::Buildconf, "[workspace]\n..\n");

    let combined = orchestrator.combined();
    assert_eq!(
        combined.len(),
        orchestrator.analysis(SourceKind::C).len()
            + orchestrator.analysis(SourceKind::Buildconf).len()
    );
    let keys: Vec<usize> = combined.iter().map(|d| d.sort_line()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(combined.iter().last().is_some_and(|d| d.line.is_none()));
}

#[test]
fn build_fails_on_errors_and_lists_artifacts() {
    let mut orchestrator = Orchestrator::default();
    let report = orchestrator.run_build();
    assert_eq!(report.status, BuildStatus::Succeeded);
    assert_eq!(
        report.artifacts,
        vec!["target/out/app.exe", "target/out/app.o"]
    );
    assert!(report.diagnostics.is_empty());

    orchestrator.set_source(SourceKind::C, "int x;");
    let report = orchestrator.run_build();
    assert_eq!(report.status, BuildStatus::Failed);
    assert!(report.summary.starts_with("build failed: 1 error(s)"));
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.message == "C: missing main function.")
    );
}

#[test]
fn config_disables_rules_and_overrides_severity() {
    let mut orchestrator = Orchestrator::default();
    orchestrator.set_source(
        SourceKind::C,
        "int main(void) {\n\tint x = 1;\n  return x;\n}",
    );
    let codes = |o: &Orchestrator| -> Vec<(String, Severity)> {
        o.analysis(SourceKind::C)
            .iter()
            .map(|d| (d.code.clone().unwrap_or_default(), d.severity))
            .collect()
    };
    assert!(codes(&orchestrator).contains(&("C010".to_string(), Severity::Warning)));

    let config = LintConfig::from_yaml_str("disabled: [C010]\nseverity:\n  C014: error\n").unwrap();
    orchestrator.set_config(config);
    let after = codes(&orchestrator);
    assert!(after.iter().all(|(code, _)| code != "C010"));
    assert!(after.contains(&("C014".to_string(), Severity::Error)));
}

#[test]
fn disabled_kind_yields_empty_result() {
    let config = LintConfig::from_yaml_str("buildconf: false\n").unwrap();
    let mut orchestrator = Orchestrator::new(config);
    assert!(
        orchestrator
            .set_source(SourceKind::Buildconf, "garbage")
            .is_empty()
    );
    assert!(!orchestrator.set_source(SourceKind::C, "garbage").is_empty());
}

struct TodoAnalyzer;

impl Analyzer for TodoAnalyzer {
    fn kind(&self) -> SourceKind {
        SourceKind::C
    }

    fn analyze(&self, source: &str) -> Vec<Diagnostic> {
        source
            .lines()
            .enumerate()
            .filter(|(_, line)| line.contains("TODO"))
            .map(|(i, _)| Diagnostic::classified("C: unresolved TODO.").at_line(i + 1))
            .collect()
    }
}

#[test]
fn custom_analyzer_replaces_the_builtin() {
    let mut orchestrator = Orchestrator::default();
    orchestrator.set_analyzer(Box::new(TodoAnalyzer));
    assert!(orchestrator.analysis(SourceKind::C).is_empty());

    let result = orchestrator.set_source(SourceKind::C, "int x;\n// TODO\n");
    assert_eq!(
        result.diagnostics(),
        &[Diagnostic::classified("C: unresolved TODO.").at_line(2)]
    );
}
