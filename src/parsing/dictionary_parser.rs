use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::analysis::RejectedEntry;
use crate::error::DecoderError;
use crate::types::bias_data::DictionaryEntry;

const BUILTIN_DICTIONARY: &str = include_str!("../../data/bias_dictionary.json");

/// A validated dictionary plus whatever was dropped while loading it.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLoad {
    pub entries: Vec<DictionaryEntry>,
    pub rejected: Vec<RejectedEntry>,
}

/// Parses a JSON array of dictionary entries.
///
/// Entries with a blank term are dropped here so the scanner never sees them.
/// Unknown severities are kept; they rank with `low`.
pub fn parse_dictionary_json(json: &str) -> Result<DictionaryLoad, DecoderError> {
    let raw: Vec<DictionaryEntry> = serde_json::from_str(json)?;
    let mut load = DictionaryLoad { entries: Vec::with_capacity(raw.len()), rejected: Vec::new() };

    for (index, entry) in raw.into_iter().enumerate() {
        if entry.term.trim().is_empty() {
            warn!(index, category = %entry.category, "dropping dictionary entry with empty term");
            load.rejected.push(RejectedEntry {
                index,
                term: entry.term,
                reason: "term is empty".to_string(),
            });
            continue;
        }
        if !entry.severity.is_recognized() {
            warn!(index, term = %entry.term, severity = %entry.severity, "unrecognized severity, ranking as lowest");
        }
        load.entries.push(entry);
    }
    Ok(load)
}

pub fn load_dictionary_from_file(path: &Path) -> Result<DictionaryLoad, DecoderError> {
    let contents = fs::read_to_string(path).map_err(|e| DecoderError::io(path, e))?;
    let load = parse_dictionary_json(&contents)?;
    info!(path = %path.display(), entries = load.entries.len(), rejected = load.rejected.len(), "loaded dictionary");
    Ok(load)
}

/// The dictionary bundled with the binary.
pub fn builtin_dictionary() -> Result<DictionaryLoad, DecoderError> {
    parse_dictionary_json(BUILTIN_DICTIONARY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::bias_data::Severity;
    use std::io::Write;

    #[test]
    fn builtin_dictionary_is_valid() {
        let load = builtin_dictionary().unwrap();
        assert!(!load.entries.is_empty());
        assert!(load.rejected.is_empty());
        assert!(load.entries.iter().all(|e| e.severity.is_recognized()));
    }

    #[test]
    fn drops_blank_terms_and_keeps_order() {
        let json = r#"[
            {"term":"ninja","category":"gender","severity":"medium","suggestion":"expert","explanation":"x"},
            {"term":"  ","category":"gender","severity":"high","suggestion":"","explanation":""},
            {"term":"young","category":"age","severity":"severe","suggestion":"motivated","explanation":"y"}
        ]"#;
        let load = parse_dictionary_json(json).unwrap();
        let terms: Vec<&str> = load.entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["ninja", "young"]);
        assert_eq!(load.rejected.len(), 1);
        assert_eq!(load.rejected[0].index, 1);
        assert_eq!(load.entries[1].severity, Severity::Unrecognized("severe".into()));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_dictionary_json("{not json"), Err(DecoderError::Json(_))));
        assert!(matches!(parse_dictionary_json(r#"[{"term":"x"}]"#), Err(DecoderError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"term":"guys","category":"gender","severity":"low","suggestion":"everyone","explanation":"z"}}]"#
        )
        .unwrap();
        let load = load_dictionary_from_file(file.path()).unwrap();
        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries[0].severity, Severity::Low);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dictionary_from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DecoderError::Io { .. }));
    }
}
