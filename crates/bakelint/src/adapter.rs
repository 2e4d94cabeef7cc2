//! The boundary between the orchestrator and a text-editing widget.

use bakelint_core::Marker;
use bakelint_lang::{CompletionSource, LanguageProfile};

/// What the orchestrator needs from an editor instance.
///
/// One adapter is attached per source kind. Adapters are driven synchronously: the host calls
/// [`Orchestrator::handle_change`](crate::Orchestrator::handle_change) after each edit, and
/// the orchestrator calls back into the adapter before returning.
///
/// There is no change subscription on the adapter itself. Calling `handle_change` is what a
/// widget's `onChange` callback would do, and keeps the adapter free of references back into
/// the orchestrator.
pub trait EditorAdapter {
    /// Current buffer content.
    fn text(&self) -> String;

    /// Replace the buffer content (used when a buffer is reset to its starter text).
    fn set_text(&mut self, text: &str);

    /// Replace every marker for the buffer.
    fn set_markers(&mut self, markers: Vec<Marker>);

    /// Configure colouring and comment tokens. Called once, on attach.
    fn register_language(&mut self, profile: &LanguageProfile);

    /// Configure completion candidates. Called once, on attach.
    fn register_completions(&mut self, completions: &CompletionSource);
}

/// An [`EditorAdapter`] backed by a plain string, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
    text: String,
    markers: Vec<Marker>,
    language: Option<&'static str>,
    completion_count: usize,
    marker_updates: usize,
}

impl MemoryEditor {
    /// An editor holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replace the text, as a user edit would.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Markers from the last publication.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of marker publications so far.
    pub fn marker_updates(&self) -> usize {
        self.marker_updates
    }

    /// Language id registered on attach.
    pub fn language(&self) -> Option<&'static str> {
        self.language
    }

    /// Number of completion candidates registered on attach.
    pub fn completion_count(&self) -> usize {
        self.completion_count
    }
}

impl EditorAdapter for MemoryEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
        self.marker_updates += 1;
    }

    fn register_language(&mut self, profile: &LanguageProfile) {
        self.language = Some(profile.id);
    }

    fn register_completions(&mut self, completions: &CompletionSource) {
        self.completion_count = completions.candidates().len();
    }
}

/// Shares one adapter between the orchestrator and the host.
///
/// The orchestrator owns its adapters; a host that needs to keep editing the same buffer
/// attaches an `Arc<Mutex<_>>` handle instead.
impl<E: EditorAdapter> EditorAdapter for std::sync::Arc<std::sync::Mutex<E>> {
    fn text(&self) -> String {
        lock(self).text()
    }

    fn set_text(&mut self, text: &str) {
        lock(self).set_text(text);
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        lock(self).set_markers(markers);
    }

    fn register_language(&mut self, profile: &LanguageProfile) {
        lock(self).register_language(profile);
    }

    fn register_completions(&mut self, completions: &CompletionSource) {
        lock(self).register_completions(completions);
    }
}

fn lock<E>(shared: &std::sync::Mutex<E>) -> std::sync::MutexGuard<'_, E> {
    // A panicked editor callback leaves the text itself intact.
    shared
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
