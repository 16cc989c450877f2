use regex::{Regex, RegexBuilder};
use std::ops::Range;

use crate::error::DecoderError;

/// Whole-word, case-insensitive finder for a single dictionary term.
///
/// The term is matched literally. A candidate only counts when the characters
/// on either side of it in the full text (not just the searched range) are
/// non-word characters or the text edge, so "male" never fires inside
/// "female".
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    pattern: Regex,
}

impl TermMatcher {
    pub fn new(term: &str) -> Result<Self, DecoderError> {
        if term.trim().is_empty() {
            return Err(DecoderError::empty_term(term));
        }
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .map_err(|source| DecoderError::Pattern { term: term.to_string(), source })?;
        Ok(TermMatcher { term: term.to_string(), pattern })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Byte ranges of every whole-word occurrence that lies entirely inside
    /// `range`. Occurrences never overlap and come back in text order.
    pub fn find_in(&self, text: &str, range: Range<usize>) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        // Cutting at range.end keeps candidates from running past the range;
        // boundary checks still look at the full text.
        let haystack = &text[..range.end];
        let mut pos = range.start;

        while pos < range.end {
            let Some(candidate) = self.pattern.find_at(haystack, pos) else {
                break;
            };
            if is_bounded(text, candidate.start(), candidate.end()) {
                found.push(candidate.start()..candidate.end());
                pos = candidate.end();
            } else {
                // Retry one character later: an overlapping occurrence may still be whole-word.
                pos = candidate.start() + next_char_len(text, candidate.start());
            }
        }
        found
    }

    pub fn count(&self, text: &str) -> usize {
        self.find_in(text, 0..text.len()).len()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn next_char_len(text: &str, at: usize) -> usize {
    text[at..].chars().next().map_or(1, char::len_utf8)
}
