//! Live analysis of the two editable buffers.
//!
//! The orchestrator owns one [`Document`] per [`SourceKind`]. Every text change runs the
//! kind's analyzer synchronously over the whole buffer, applies the [`LintConfig`], sorts the
//! result and republishes it: to the attached editor as markers and to subscribers as an
//! [`AnalysisUpdate`]. There is no caching or diffing; buffers are small and both analyzers
//! are linear scans.
//!
//! # Buffer states
//!
//! ```text
//! Clean --set_source--> Dirty --analysis--> Clean
//! ```
//!
//! The `Dirty` state never outlives a call: analysis always completes before
//! [`Orchestrator::set_source`] returns.

use crate::adapter::EditorAdapter;
use crate::build::BuildReport;
use crate::defaults::default_source;
use crate::error::BakelintError;
use bakelint_buildconf::BuildconfAnalyzer;
use bakelint_c::CAnalyzer;
use bakelint_core::{
    AnalysisResult, Analyzer, LineIndex, LintConfig, Severity, SourceBuffer, SourceKind,
    markers_for,
};
use bakelint_lang::LanguageProfile;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Whether a buffer's last analysis matches its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// The stored result was computed from the current text.
    Clean,
    /// The text changed since the last analysis.
    Dirty,
}

/// Published after every analysis pass.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisUpdate<'a> {
    /// The analyzed buffer.
    pub kind: SourceKind,
    /// Text version the result belongs to.
    pub version: u64,
    /// The new result.
    pub result: &'a AnalysisResult,
}

/// Subscriber callback type.
pub type AnalysisCallback = Box<dyn FnMut(&AnalysisUpdate<'_>) + Send>;

/// One editable buffer and its latest analysis.
pub struct Document {
    buffer: SourceBuffer,
    state: BufferState,
    version: u64,
    result: AnalysisResult,
    analyzer: Box<dyn Analyzer + Send>,
    adapter: Option<Box<dyn EditorAdapter + Send>>,
}

impl Document {
    fn new(kind: SourceKind, analyzer: Box<dyn Analyzer + Send>) -> Self {
        Self {
            buffer: SourceBuffer::new(kind, default_source(kind)),
            state: BufferState::Dirty,
            version: 0,
            result: AnalysisResult::new(),
            analyzer,
            adapter: None,
        }
    }

    /// The current text snapshot.
    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    /// Buffer state.
    pub fn state(&self) -> BufferState {
        self.state
    }

    /// Number of text changes so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The latest analysis.
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    /// Whether an editor is attached.
    pub fn is_attached(&self) -> bool {
        self.adapter.is_some()
    }

    fn replace_text(&mut self, text: Arc<str>) {
        self.buffer = SourceBuffer::new(self.buffer.kind(), text);
        self.version += 1;
        self.state = BufferState::Dirty;
        trace!(kind = %self.buffer.kind(), version = self.version, "buffer clean -> dirty");
    }

    fn analyze(&mut self, config: &LintConfig) {
        let kind = self.buffer.kind();
        let diagnostics = if config.is_enabled(kind) {
            config.apply(self.analyzer.analyze(self.buffer.text()))
        } else {
            Vec::new()
        };
        self.result = AnalysisResult::from_diagnostics(diagnostics);
        self.state = BufferState::Clean;

        debug!(
            kind = %kind,
            version = self.version,
            errors = self.result.count(Severity::Error),
            warnings = self.result.count(Severity::Warning),
            suggestions = self.result.count(Severity::Suggestion),
            "analysis pass"
        );
        trace!(kind = %kind, version = self.version, "buffer dirty -> clean");

        self.publish_markers();
    }

    fn publish_markers(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        let index = LineIndex::from_text(self.buffer.text());
        let markers = markers_for(&index, self.result.diagnostics());
        trace!(kind = %self.buffer.kind(), markers = markers.len(), "publishing markers");
        adapter.set_markers(markers);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("kind", &self.buffer.kind())
            .field("state", &self.state)
            .field("version", &self.version)
            .field("diagnostics", &self.result.len())
            .field("attached", &self.adapter.is_some())
            .finish()
    }
}

/// Owns both buffers and keeps their analyses current.
///
/// # Example
///
/// ```rust
/// use bakelint::Orchestrator;
/// use bakelint_core::SourceKind;
///
/// let mut orchestrator = Orchestrator::default();
/// assert!(orchestrator.combined().is_empty());
///
/// let result = orchestrator.set_source(SourceKind::C, "int main(void) { int x = 1 return 0; }");
/// assert!(result.iter().any(|d| d.message == "C: missing semicolon on line 1."));
/// ```
pub struct Orchestrator {
    config: LintConfig,
    c: Document,
    buildconf: Document,
    callbacks: Vec<AnalysisCallback>,
}

impl Orchestrator {
    /// Start with the starter buffers, analyzed under `config`.
    pub fn new(config: LintConfig) -> Self {
        let mut orchestrator = Self {
            config,
            c: Document::new(SourceKind::C, Box::new(CAnalyzer)),
            buildconf: Document::new(SourceKind::Buildconf, Box::new(BuildconfAnalyzer)),
            callbacks: Vec::new(),
        };
        for kind in SourceKind::ALL {
            orchestrator.refresh(kind);
        }
        orchestrator
    }

    /// The active config.
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Swap the config and re-analyze both buffers.
    pub fn set_config(&mut self, config: LintConfig) {
        self.config = config;
        for kind in SourceKind::ALL {
            self.refresh(kind);
        }
    }

    /// Replace the analyzer for its kind and re-analyze that buffer.
    pub fn set_analyzer(&mut self, analyzer: Box<dyn Analyzer + Send>) {
        let kind = analyzer.kind();
        self.document_mut(kind).analyzer = analyzer;
        self.refresh(kind);
    }

    /// The buffer of `kind`.
    pub fn document(&self, kind: SourceKind) -> &Document {
        match kind {
            SourceKind::C => &self.c,
            SourceKind::Buildconf => &self.buildconf,
        }
    }

    fn document_mut(&mut self, kind: SourceKind) -> &mut Document {
        match kind {
            SourceKind::C => &mut self.c,
            SourceKind::Buildconf => &mut self.buildconf,
        }
    }

    /// Latest analysis of `kind`.
    pub fn analysis(&self, kind: SourceKind) -> &AnalysisResult {
        self.document(kind).result()
    }

    /// Both analyses merged into one sorted result.
    pub fn combined(&self) -> AnalysisResult {
        AnalysisResult::merge([self.c.result(), self.buildconf.result()])
    }

    /// Replace the text of `kind` and re-analyze it.
    pub fn set_source(&mut self, kind: SourceKind, text: impl Into<Arc<str>>) -> &AnalysisResult {
        self.document_mut(kind).replace_text(text.into());
        self.refresh(kind);
        self.analysis(kind)
    }

    /// Re-analyze the current text of `kind` without changing it.
    pub fn run_analysis(&mut self, kind: SourceKind) -> &AnalysisResult {
        self.refresh(kind);
        self.analysis(kind)
    }

    /// Restore the starter text of `kind`, pushing it to the attached editor if any.
    pub fn reset(&mut self, kind: SourceKind) -> &AnalysisResult {
        let text = default_source(kind);
        if let Some(adapter) = self.document_mut(kind).adapter.as_mut() {
            adapter.set_text(text);
        }
        self.set_source(kind, text)
    }

    /// Attach an editor to `kind`.
    ///
    /// Registers the language profile and completions, then adopts the editor's text and
    /// publishes markers for it.
    pub fn attach(
        &mut self,
        kind: SourceKind,
        mut adapter: Box<dyn EditorAdapter + Send>,
    ) -> Result<&AnalysisResult, BakelintError> {
        let profile = LanguageProfile::for_kind(kind)?;
        adapter.register_language(&profile);
        adapter.register_completions(&profile.completions);
        let text = adapter.text();
        debug!(kind = %kind, language = profile.id, "editor attached");

        self.document_mut(kind).adapter = Some(adapter);
        Ok(self.set_source(kind, text))
    }

    /// Detach and return the editor of `kind`.
    pub fn detach(&mut self, kind: SourceKind) -> Option<Box<dyn EditorAdapter + Send>> {
        self.document_mut(kind).adapter.take()
    }

    /// React to an edit in the attached editor of `kind`.
    ///
    /// Returns `None` when no editor is attached.
    pub fn handle_change(&mut self, kind: SourceKind) -> Option<&AnalysisResult> {
        let text = self.document(kind).adapter.as_ref()?.text();
        Some(self.set_source(kind, text))
    }

    /// Register a callback run after every analysis pass.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&AnalysisUpdate<'_>) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Re-run both analyses and report a simulated build.
    pub fn run_build(&mut self) -> BuildReport {
        for kind in SourceKind::ALL {
            self.refresh(kind);
        }
        let report = BuildReport::from_analysis(self.combined());
        debug!(status = %report.status, diagnostics = report.diagnostics.len(), "build");
        report
    }

    fn refresh(&mut self, kind: SourceKind) {
        let Self {
            config,
            c,
            buildconf,
            callbacks,
        } = self;
        let document = match kind {
            SourceKind::C => c,
            SourceKind::Buildconf => buildconf,
        };
        document.analyze(config);

        let update = AnalysisUpdate {
            kind,
            version: document.version,
            result: &document.result,
        };
        for callback in callbacks.iter_mut() {
            callback(&update);
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("c", &self.c)
            .field("buildconf", &self.buildconf)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
