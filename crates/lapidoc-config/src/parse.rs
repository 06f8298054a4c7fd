//! Configuration file parsing.
//!
//! Parses individual `.lapidoc.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Corpus file, relative to the directory holding this config.
    pub corpus: Option<String>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Display settings section.
    pub display: Option<RawDisplaySettings>,
}

/// Raw search settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Maximum results per query.
    pub limit: Option<usize>,
    /// Preview length in characters.
    pub preview_chars: Option<usize>,
    /// Quiescence period before a typed query runs.
    pub debounce_ms: Option<u64>,
    /// Block kinds whose content is searched. A single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub indexed_blocks: Option<Vec<String>>,
    /// Per-field score weights.
    pub weights: Option<RawWeights>,
}

/// Raw score weights. Each field overrides one default independently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawWeights {
    /// Title match.
    pub title: Option<u32>,
    /// Description match.
    pub description: Option<u32>,
    /// Per paragraph.
    pub paragraph: Option<u32>,
    /// Per code block.
    pub code: Option<u32>,
    /// Per list item.
    pub list_item: Option<u32>,
    /// Per heading line.
    pub heading: Option<u32>,
    /// Per subheading.
    pub subheading: Option<u32>,
    /// Per table row.
    pub table_row: Option<u32>,
}

/// Raw display settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDisplaySettings {
    /// Document shown when no id is given.
    pub start_page: Option<String>,
    /// Language assumed for code blocks without one.
    pub default_language: Option<String>,
    /// Syntax highlighting theme name.
    pub theme: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
