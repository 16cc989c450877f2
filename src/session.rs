//! Caller-owned analysis state: the input text, which view is showing, and
//! the match/segment lists from the last analysis.
//!
//! Both lists are replaced wholesale on every analysis and cleared on reset;
//! nothing is updated in place.

use tracing::info;

use crate::analysis::{compose, scan, SeveritySummary};
use crate::config::DEFAULT_MAX_INPUT_CHARS;
use crate::types::bias_data::{DictionaryEntry, MatchRecord, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Input,
    Analyzed,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    input_text: String,
    view: ViewState,
    results: Vec<MatchRecord>,
    segments: Vec<Segment>,
    max_input_chars: usize,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        AnalysisSession::new(DEFAULT_MAX_INPUT_CHARS)
    }
}

impl AnalysisSession {
    pub fn new(max_input_chars: usize) -> Self {
        AnalysisSession {
            input_text: String::new(),
            view: ViewState::Input,
            results: Vec::new(),
            segments: Vec::new(),
            max_input_chars,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Mutable access for text widgets; call [`AnalysisSession::clamp_input`] after editing.
    pub fn input_text_mut(&mut self) -> &mut String {
        &mut self.input_text
    }

    /// Replaces the input, keeping at most `max_input_chars` characters.
    pub fn set_input(&mut self, text: &str) {
        self.input_text = text.to_string();
        self.clamp_input();
    }

    pub fn clamp_input(&mut self) {
        if let Some((byte_idx, _)) = self.input_text.char_indices().nth(self.max_input_chars) {
            self.input_text.truncate(byte_idx);
        }
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn results(&self) -> &[MatchRecord] {
        &self.results
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn can_analyze(&self) -> bool {
        !self.input_text.trim().is_empty()
    }

    /// Scans and composes the current input. Blank input is a no-op.
    pub fn analyze(&mut self, dictionary: &[DictionaryEntry]) {
        if !self.can_analyze() {
            return;
        }
        let results = scan(&self.input_text, dictionary);
        let segments = compose(&self.input_text, &results);
        info!(issues = results.len(), segments = segments.len(), "analysis finished");

        self.results = results;
        self.segments = segments;
        self.view = ViewState::Analyzed;
    }

    /// Back to the editable input view; the text itself is kept.
    pub fn reset(&mut self) {
        self.results.clear();
        self.segments.clear();
        self.view = ViewState::Input;
    }

    pub fn summary(&self) -> SeveritySummary {
        SeveritySummary::from_matches(&self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_input_truncates_on_char_boundary() {
        let mut session = AnalysisSession::new(3);
        session.set_input("héllo");
        assert_eq!(session.input_text(), "hél");
    }

    #[test]
    fn short_input_is_left_alone() {
        let mut session = AnalysisSession::new(10);
        session.set_input("short");
        assert_eq!(session.input_text(), "short");
    }
}
