//! Logical line index.
//!
//! Maps byte offsets found by regex scans to 1-based lines, and clamps lines coming back from
//! analyzers into the range an editor can display. Backed by a [`Rope`]; only `\n` counts as a
//! line break, matching how the analyzers split their input.

use ropey::Rope;

/// Line index over one buffer snapshot.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count (an empty document has 1 line; a trailing `\n` opens a new line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total byte count.
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }

    /// 1-based line containing the byte at `byte_offset`.
    ///
    /// Offsets past the end map to the last line.
    pub fn line_of_offset(&self, byte_offset: usize) -> usize {
        let byte_offset = byte_offset.min(self.rope.len_bytes());
        self.rope.byte_to_line(byte_offset) + 1
    }

    /// Clamp a 1-based line into `1..=line_count`.
    pub fn clamp_line(&self, line: usize) -> usize {
        line.clamp(1, self.line_count())
    }

    /// Text of a 1-based line, without its line break.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line - 1).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }

        Some(text)
    }

    /// Character count of a 1-based line, without its line break (0 for unknown lines).
    pub fn line_char_len(&self, line: usize) -> usize {
        self.line_text(line).map_or(0, |t| t.chars().count())
    }
}
