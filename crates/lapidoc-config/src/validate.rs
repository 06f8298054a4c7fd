//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::PathBuf};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `search.limit` is zero, so every search returns nothing.
    ZeroLimit,
    /// `search.preview_chars` is zero, so every preview is just an ellipsis.
    ZeroPreviewChars,
    /// No block kinds are indexed; only titles and descriptions match.
    EmptyIndexPolicy,
    /// The configured corpus file does not exist.
    CorpusFileMissing {
        /// Path that doesn't exist.
        path: PathBuf,
    },
    /// The configured corpus path is not a file.
    CorpusNotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLimit => write!(f, "search.limit is 0; searches will return nothing"),
            Self::ZeroPreviewChars => {
                write!(f, "search.preview_chars is 0; previews will be empty")
            }
            Self::EmptyIndexPolicy => write!(
                f,
                "search.indexed_blocks is empty; only titles and descriptions are searched"
            ),
            Self::CorpusFileMissing { path } => {
                write!(f, "corpus file does not exist: {}", path.display())
            }
            Self::CorpusNotAFile { path } => {
                write!(f, "corpus path is not a file: {}", path.display())
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.search.limit == 0 {
        warnings.push(ConfigWarning::ZeroLimit);
    }
    if config.search.preview_chars == 0 {
        warnings.push(ConfigWarning::ZeroPreviewChars);
    }
    if config.search.indexed_blocks.is_empty() {
        warnings.push(ConfigWarning::EmptyIndexPolicy);
    }

    if let Some(path) = &config.corpus {
        if !path.exists() {
            warnings.push(ConfigWarning::CorpusFileMissing { path: path.clone() });
        } else if !path.is_file() {
            warnings.push(ConfigWarning::CorpusNotAFile { path: path.clone() });
        }
    }

    warnings
}
