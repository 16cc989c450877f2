use serde::Serialize;
use tracing::{debug, warn};

use super::matcher::TermMatcher;
use super::ranking::rank_by_severity;
use crate::error::DecoderError;
use crate::types::bias_data::{DictionaryEntry, MatchRecord};

/// A dictionary entry the scanner refused to match.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    /// Position of the entry in the dictionary passed to the scan.
    pub index: usize,
    pub term: String,
    pub reason: String,
}

/// Scan output plus the entries that were skipped along the way.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub matches: Vec<MatchRecord>,
    pub rejected: Vec<RejectedEntry>,
}

/// Counts whole-word, case-insensitive occurrences of `term` in `text`.
pub fn count_occurrences(text: &str, term: &str) -> Result<usize, DecoderError> {
    Ok(TermMatcher::new(term)?.count(text))
}

/// Matches every dictionary entry against `text` and returns the ones that
/// occur at least once, critical-first.
///
/// Entries that cannot be matched are skipped (and logged); they never abort
/// the scan.
pub fn scan(text: &str, dictionary: &[DictionaryEntry]) -> Vec<MatchRecord> {
    scan_with_report(text, dictionary).matches
}

pub fn scan_with_report(text: &str, dictionary: &[DictionaryEntry]) -> ScanReport {
    let mut report = ScanReport::default();

    // Every entry is validated, even when there is no text to count against.
    for (index, entry) in dictionary.iter().enumerate() {
        let matcher = match TermMatcher::new(&entry.term) {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!(index, term = %entry.term, error = %e, "skipping dictionary entry");
                report.rejected.push(RejectedEntry {
                    index,
                    term: entry.term.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let count = if text.is_empty() { 0 } else { matcher.count(text) };
        if count > 0 {
            report.matches.push(MatchRecord { entry: entry.clone(), count });
        }
    }

    rank_by_severity(&mut report.matches);
    debug!(
        text_len = text.len(),
        entries = dictionary.len(),
        matched = report.matches.len(),
        rejected = report.rejected.len(),
        "scan complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_nothing() {
        let dictionary = vec![DictionaryEntry::new("male", "gender", "high", "", "")];
        assert!(scan("", &dictionary).is_empty());
    }

    #[test]
    fn empty_text_still_reports_rejected_entries() {
        let dictionary = vec![
            DictionaryEntry::new("", "broken", "critical", "", ""),
            DictionaryEntry::new("ninja", "culture", "low", "expert", ""),
        ];
        let report = scan_with_report("", &dictionary);
        assert!(report.matches.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 0);
    }

    #[test]
    fn count_occurrences_rejects_empty_term() {
        assert!(matches!(count_occurrences("anything", ""), Err(DecoderError::InvalidEntry { .. })));
        assert_eq!(count_occurrences("Guys, hey guys", "guys").unwrap(), 2);
    }

    #[test]
    fn rejected_entries_are_reported_with_their_index() {
        let dictionary = vec![
            DictionaryEntry::new("ninja", "culture", "low", "expert", ""),
            DictionaryEntry::new("", "broken", "critical", "", ""),
        ];
        let report = scan_with_report("a coding ninja", &dictionary);
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 1);
    }
}
