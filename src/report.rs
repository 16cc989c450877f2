use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::analysis::{compose, scan_with_report, RejectedEntry, SeveritySummary};
use crate::error::DecoderError;
use crate::types::bias_data::{DictionaryEntry, MatchRecord, Segment};

/// Everything one analysis produced, in a shape that serializes to JSON.
#[derive(Serialize, Debug, Clone)]
pub struct AnalysisReport {
    pub text_chars: usize,
    pub summary: SeveritySummary,
    pub matches: Vec<MatchRecord>,
    pub segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedEntry>,
}

impl AnalysisReport {
    pub fn build(text: &str, dictionary: &[DictionaryEntry]) -> Self {
        let scan = scan_with_report(text, dictionary);
        let segments = compose(text, &scan.matches);
        AnalysisReport {
            text_chars: text.chars().count(),
            summary: SeveritySummary::from_matches(&scan.matches),
            matches: scan.matches,
            segments,
            rejected: scan.rejected,
        }
    }
}

/// The sidebar as plain text: a header line, then one card per flagged term.
pub fn render_text_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    if report.summary.is_clean() {
        out.push_str("No Biases Detected!\n");
        out.push_str("Great job! We didn't find any flagged terms in our dictionary.\n");
        return out;
    }

    let _ = writeln!(out, "{} Issues Found ({} occurrences)", report.summary.issues, report.summary.total_occurrences);
    for record in &report.matches {
        let entry = &record.entry;
        out.push('\n');
        let _ = writeln!(
            out,
            "[{}] \"{}\" x{}  ({})",
            entry.severity.label().to_uppercase(),
            entry.term,
            record.count,
            entry.category
        );
        if !entry.explanation.is_empty() {
            let _ = writeln!(out, "  {}", entry.explanation);
        }
        let _ = writeln!(out, "  Try: {}", entry.suggestion);
    }
    out
}

/// The highlighted text for terminals: each highlight becomes `[[text|severity]]`.
pub fn render_marked_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain { text } => out.push_str(text),
            Segment::Highlight { text, severity, .. } => {
                let _ = write!(out, "[[{}|{}]]", text, severity);
            }
        }
    }
    out
}

pub fn save_report_json(report: &AnalysisReport, file_path: &Path) -> Result<(), DecoderError> {
    let file = File::create(file_path).map_err(|e| DecoderError::io(file_path, e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
