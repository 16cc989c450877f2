use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DecoderError;
use crate::parsing::dictionary_parser::{builtin_dictionary, load_dictionary_from_file, DictionaryLoad};

pub const DEFAULT_MAX_INPUT_CHARS: usize = 5000;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// JSON dictionary to scan with. The bundled dictionary is used when unset.
    pub dictionary_path: Option<String>,
    pub max_input_chars: usize,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dictionary_path: None,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load_dictionary(&self) -> Result<DictionaryLoad, DecoderError> {
        match &self.dictionary_path {
            Some(path) => load_dictionary_from_file(Path::new(path)),
            None => builtin_dictionary(),
        }
    }
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config, DecoderError> {
    let contents = fs::read_to_string(file_path).map_err(|e| DecoderError::io(file_path, e))?;
    let loaded_config = toml::from_str::<Config>(&contents)
        .map_err(|e| DecoderError::Config(format!("failed to parse {}: {}", file_path.display(), e)))?;

    if let Some(dictionary_path) = &loaded_config.dictionary_path {
        if !PathBuf::from(dictionary_path).is_file() {
            return Err(DecoderError::Config(format!(
                "dictionary_path specified in {} ('{}') is not a file",
                file_path.display(),
                dictionary_path
            )));
        }
    }
    if loaded_config.max_input_chars == 0 {
        return Err(DecoderError::Config(format!(
            "max_input_chars in {} must be greater than zero",
            file_path.display()
        )));
    }
    Ok(loaded_config)
}

/// Like [`load_config_from_file`], but a missing file means defaults.
pub fn load_config_or_default(file_path: &Path) -> Result<Config, DecoderError> {
    if file_path.exists() {
        load_config_from_file(file_path)
    } else {
        Ok(Config::default())
    }
}
