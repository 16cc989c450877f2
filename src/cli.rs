//! Headless side of the binary: where the dictionary comes from, reading the
//! input, and printing an analysis.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::DecoderError;
use crate::parsing::dictionary_parser::{builtin_dictionary, load_dictionary_from_file, DictionaryLoad};
use crate::report::{render_marked_text, render_text_report, save_report_json, AnalysisReport};
use crate::session::AnalysisSession;
use crate::types::bias_data::DictionaryEntry;

/// The dictionary a run actually uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Builtin,
    File(PathBuf),
}

impl DictionarySource {
    /// A `--dictionary` override wins over the configured path.
    pub fn resolve(override_path: Option<&Path>, config: &Config) -> Self {
        match (override_path, &config.dictionary_path) {
            (Some(path), _) => DictionarySource::File(path.to_path_buf()),
            (None, Some(path)) => DictionarySource::File(PathBuf::from(path)),
            (None, None) => DictionarySource::Builtin,
        }
    }

    pub fn load(&self) -> Result<DictionaryLoad, DecoderError> {
        match self {
            DictionarySource::Builtin => builtin_dictionary(),
            DictionarySource::File(path) => load_dictionary_from_file(path),
        }
    }

    /// Status line for the viewer's top bar.
    pub fn describe(&self, load: &DictionaryLoad) -> String {
        let skipped = match load.rejected.len() {
            0 => String::new(),
            n => format!(", {} skipped", n),
        };
        match self {
            DictionarySource::Builtin => format!("Built-in dictionary ({} terms{})", load.entries.len(), skipped),
            DictionarySource::File(path) => {
                format!("Dictionary: {} ({} terms{})", path.display(), load.entries.len(), skipped)
            }
        }
    }
}

/// Reads `input`, or all of `stdin` when `input` is `-`.
pub fn read_input(input: &Path, mut stdin: impl Read) -> Result<String, DecoderError> {
    if input == Path::new("-") {
        let mut buffer = String::new();
        stdin
            .read_to_string(&mut buffer)
            .map_err(|e| DecoderError::io("<stdin>", e))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).map_err(|e| DecoderError::io(input, e))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub json: bool,
    pub output: Option<PathBuf>,
    pub max_input_chars: usize,
}

#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub report: AnalysisReport,
    pub truncated: bool,
}

/// Analyzes `raw`, writes the marked text and report (or JSON) to `out`, and
/// saves the JSON report when an output path is set.
pub fn run_analyze(
    raw: &str,
    dictionary: &[DictionaryEntry],
    options: &AnalyzeOptions,
    out: &mut impl Write,
) -> Result<AnalyzeOutcome, DecoderError> {
    let mut session = AnalysisSession::new(options.max_input_chars);
    session.set_input(raw);
    let truncated = session.input_text().len() < raw.len();
    if truncated {
        warn!(max_chars = options.max_input_chars, "input truncated before analysis");
    }

    let report = AnalysisReport::build(session.input_text(), dictionary);
    if let Some(path) = &options.output {
        save_report_json(&report, path)?;
        info!(path = %path.display(), "saved report");
    }

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out).map_err(DecoderError::Output)?;
    } else {
        writeln!(out, "{}", render_marked_text(&report.segments)).map_err(DecoderError::Output)?;
        writeln!(out).map_err(DecoderError::Output)?;
        write!(out, "{}", render_text_report(&report)).map_err(DecoderError::Output)?;
    }
    Ok(AnalyzeOutcome { report, truncated })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(max_input_chars: usize) -> AnalyzeOptions {
        AnalyzeOptions { max_input_chars, ..Default::default() }
    }

    fn dictionary() -> Vec<DictionaryEntry> {
        vec![DictionaryEntry::new("young", "age", "high", "motivated", "Age preference.")]
    }

    #[test]
    fn dictionary_override_wins_over_config() {
        let config = Config { dictionary_path: Some("configured.json".into()), ..Config::default() };
        assert_eq!(
            DictionarySource::resolve(Some(Path::new("override.json")), &config),
            DictionarySource::File(PathBuf::from("override.json"))
        );
        assert_eq!(
            DictionarySource::resolve(None, &config),
            DictionarySource::File(PathBuf::from("configured.json"))
        );
        assert_eq!(DictionarySource::resolve(None, &Config::default()), DictionarySource::Builtin);
    }

    #[test]
    fn status_line_names_the_file_actually_loaded() {
        let load = DictionaryLoad { entries: dictionary(), rejected: Vec::new() };
        let source = DictionarySource::resolve(Some(Path::new("custom.json")), &Config::default());
        assert_eq!(source.describe(&load), "Dictionary: custom.json (1 terms)");
        assert_eq!(DictionarySource::Builtin.describe(&load), "Built-in dictionary (1 terms)");
    }

    #[test]
    fn reads_stdin_for_dash() {
        let text = read_input(Path::new("-"), "Hey guys".as_bytes()).unwrap();
        assert_eq!(text, "Hey guys");
    }

    #[test]
    fn reads_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ad.txt");
        std::fs::write(&path, "young team").unwrap();
        assert_eq!(read_input(&path, std::io::empty()).unwrap(), "young team");
        assert!(matches!(read_input(&dir.path().join("missing.txt"), std::io::empty()), Err(DecoderError::Io { .. })));
    }

    #[test]
    fn prints_marked_text_and_report() {
        let mut out = Vec::new();
        let outcome = run_analyze("A young team.", &dictionary(), &options(5000), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(!outcome.truncated);
        assert!(printed.starts_with("A [[young|high]] team.\n\n1 Issues Found"));
        assert!(printed.contains("Try: motivated"));
    }

    #[test]
    fn truncates_long_input() {
        let mut out = Vec::new();
        let outcome = run_analyze("young young young", &dictionary(), &options(8), &mut out).unwrap();
        assert!(outcome.truncated);
        assert_eq!(outcome.report.text_chars, 8);
        assert_eq!(outcome.report.matches[0].count, 1);
    }

    #[test]
    fn json_mode_prints_and_saves_the_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let opts = AnalyzeOptions { json: true, output: Some(path.clone()), max_input_chars: 5000 };
        let mut out = Vec::new();
        run_analyze("young", &dictionary(), &opts, &mut out).unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["matches"][0]["term"], "young");
        let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, printed);
    }
}
