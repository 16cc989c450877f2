use serde::Serialize;
use std::cmp::Reverse;

use crate::types::bias_data::{MatchRecord, Severity};

/// Orders matches critical-first. The sort is stable, so records of equal
/// severity keep their dictionary order.
pub fn rank_by_severity(matches: &mut [MatchRecord]) {
    matches.sort_by_key(|record| Reverse(record.entry.severity.rank()));
}

/// Per-severity tallies for a ranked match list.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SeveritySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unrecognized: usize,
    /// Distinct flagged terms ("issues").
    pub issues: usize,
    /// Sum of every term's occurrence count.
    pub total_occurrences: usize,
}

impl SeveritySummary {
    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        let mut summary = SeveritySummary::default();
        for record in matches {
            match record.entry.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Unrecognized(_) => summary.unrecognized += 1,
            }
            summary.issues += 1;
            summary.total_occurrences += record.count;
        }
        summary
    }

    pub fn is_clean(&self) -> bool {
        self.issues == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::bias_data::DictionaryEntry;

    fn record(term: &str, severity: &str, count: usize) -> MatchRecord {
        MatchRecord {
            entry: DictionaryEntry::new(term, "test", severity, "", ""),
            count,
        }
    }

    #[test]
    fn ranks_critical_first() {
        let mut matches = vec![
            record("a", "medium", 1),
            record("b", "critical", 1),
            record("c", "low", 1),
            record("d", "high", 1),
        ];
        rank_by_severity(&mut matches);
        let order: Vec<&str> = matches.iter().map(|m| m.severity().label()).collect();
        assert_eq!(order, vec!["critical", "high", "medium", "low"]);
    }

    #[test]
    fn equal_severity_keeps_dictionary_order() {
        let mut matches = vec![
            record("first", "low", 1),
            record("second", "high", 1),
            record("third", "low", 5),
            record("fourth", "bogus", 1),
            record("fifth", "high", 1),
        ];
        rank_by_severity(&mut matches);
        let terms: Vec<&str> = matches.iter().map(MatchRecord::term).collect();
        assert_eq!(terms, vec!["second", "fifth", "first", "third", "fourth"]);
    }

    #[test]
    fn summary_counts_issues_and_occurrences() {
        let matches = vec![record("a", "critical", 2), record("b", "low", 3), record("c", "odd", 1)];
        let summary = SeveritySummary::from_matches(&matches);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.unrecognized, 1);
        assert_eq!(summary.issues, 3);
        assert_eq!(summary.total_occurrences, 6);
        assert!(!summary.is_clean());
        assert!(SeveritySummary::from_matches(&[]).is_clean());
    }
}
