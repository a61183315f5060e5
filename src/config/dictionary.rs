//! Dictionary configuration module.
//!
//! This module defines where the command-line tool finds the word list it
//! preloads into a trie, and how that file is read.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::error::{LexiError, LexiResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Word list configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Word list file, one string per line (None for an empty trie)
    pub path: Option<PathBuf>,

    /// Whether to strip leading and trailing whitespace from every line
    pub trim_whitespace: bool,

    /// Whether to ignore lines that are empty after trimming
    pub skip_blank_lines: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: None,
            trim_whitespace: true,
            skip_blank_lines: true,
        }
    }
}

impl Validate for DictionaryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "dictionary path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl DictionaryConfig {
    /// Splits word list contents into the strings to insert.
    pub fn parse_words<'a>(&self, contents: &'a str) -> Vec<&'a str> {
        contents
            .lines()
            .map(|line| if self.trim_whitespace { line.trim() } else { line })
            .filter(|word| !(self.skip_blank_lines && word.is_empty()))
            .collect()
    }

    /// Reads the configured word list, or returns no words if none is configured.
    pub fn load_words(&self) -> LexiResult<Vec<String>> {
        match &self.path {
            Some(path) => self.load_words_from(path),
            None => Ok(Vec::new()),
        }
    }

    /// Reads a word list from `path`.
    pub fn load_words_from(&self, path: &Path) -> LexiResult<Vec<String>> {
        let contents = std::fs::read_to_string(path).map_err(|source| LexiError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let words: Vec<String> = self
            .parse_words(&contents)
            .into_iter()
            .map(str::to_string)
            .collect();
        tracing::debug!(path = %path.display(), count = words.len(), "Loaded word list");
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_words_defaults() {
        let config = DictionaryConfig::default();
        let words = config.parse_words("cat\n  dog \n\n\tcar\n");
        assert_eq!(words, vec!["cat", "dog", "car"]);
    }

    #[test]
    fn test_parse_words_keeps_raw_lines() {
        let config = DictionaryConfig {
            trim_whitespace: false,
            skip_blank_lines: false,
            ..Default::default()
        };
        let words = config.parse_words("cat\n dog\n\n");
        assert_eq!(words, vec!["cat", " dog", ""]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let config = DictionaryConfig::default();
        let err = config
            .load_words_from(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, LexiError::ReadFile { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let config = DictionaryConfig {
            path: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
