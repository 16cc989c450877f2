use serde::{Deserialize, Serialize};
use std::fmt;

// --- Severity ---

/// How strongly a dictionary term is flagged.
///
/// Anything other than the four known labels (including a missing field) is
/// kept as `Unrecognized` so the original label can still be shown, and ranks
/// alongside `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unrecognized(String),
}

impl Severity {
    /// Sort rank, higher first: critical 3, high 2, medium 1, everything else 0.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 3,
            Severity::High => 2,
            Severity::Medium => 1,
            Severity::Low | Severity::Unrecognized(_) => 0,
        }
    }

    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed {
            s if s.eq_ignore_ascii_case("critical") => Severity::Critical,
            s if s.eq_ignore_ascii_case("high") => Severity::High,
            s if s.eq_ignore_ascii_case("medium") => Severity::Medium,
            s if s.eq_ignore_ascii_case("low") => Severity::Low,
            _ => Severity::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Severity::Unrecognized(_))
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Unrecognized(String::new())
    }
}

impl From<String> for Severity {
    fn from(label: String) -> Self {
        Severity::from_label(&label)
    }
}

impl From<&str> for Severity {
    fn from(label: &str) -> Self {
        Severity::from_label(label)
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.label().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// --- Dictionary & matches ---

/// One flagged term from the bias dictionary. Field names follow the
/// dictionary JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DictionaryEntry {
    pub term: String,
    pub category: String,
    #[serde(default)]
    pub severity: Severity,
    pub suggestion: String,
    pub explanation: String,
}

impl DictionaryEntry {
    pub fn new(
        term: &str,
        category: &str,
        severity: impl Into<Severity>,
        suggestion: &str,
        explanation: &str,
    ) -> Self {
        DictionaryEntry {
            term: term.to_string(),
            category: category.to_string(),
            severity: severity.into(),
            suggestion: suggestion.to_string(),
            explanation: explanation.to_string(),
        }
    }
}

/// A dictionary entry that occurred at least once in the analyzed text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchRecord {
    #[serde(flatten)]
    pub entry: DictionaryEntry,
    pub count: usize,
}

impl MatchRecord {
    pub fn term(&self) -> &str {
        &self.entry.term
    }

    pub fn severity(&self) -> &Severity {
        &self.entry.severity
    }
}

// --- Composed output ---

/// A contiguous run of the analyzed text, either untouched or attributed to
/// exactly one matched term.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Plain {
        text: String,
    },
    Highlight {
        text: String,
        matched_term: String,
        severity: Severity,
        category: String,
        explanation: String,
    },
}

impl Segment {
    pub fn plain(text: &str) -> Self {
        Segment::Plain { text: text.to_string() }
    }

    pub fn highlight(text: &str, record: &MatchRecord) -> Self {
        Segment::Highlight {
            text: text.to_string(),
            matched_term: record.entry.term.clone(),
            severity: record.entry.severity.clone(),
            category: record.entry.category.clone(),
            explanation: record.entry.explanation.clone(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Highlight { text, .. } => text,
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, Segment::Highlight { .. })
    }

    /// "category: explanation" shown when hovering a highlight.
    pub fn hover_text(&self) -> Option<String> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Highlight { category, explanation, .. } => Some(format!("{}: {}", category, explanation)),
        }
    }
}

/// Joins segment texts back into the string they were composed from.
pub fn concat_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}
