use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the dictionary loader, the scanner and the config layer.
#[derive(Debug, Error)]
pub enum DecoderError {
    /// A dictionary entry whose term cannot be matched (empty or blank).
    #[error("invalid dictionary entry '{term}': {reason}")]
    InvalidEntry { term: String, reason: String },

    #[error("failed to build matcher for term '{term}': {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl DecoderError {
    pub(crate) fn empty_term(term: &str) -> Self {
        DecoderError::InvalidEntry {
            term: term.to_string(),
            reason: "term is empty".to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DecoderError::Io { path: path.into(), source }
    }
}
