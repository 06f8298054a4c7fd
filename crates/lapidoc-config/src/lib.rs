//! Configuration system for lapidoc.
//!
//! lapidoc uses TOML configuration files named `.lapidoc.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.lapidoc.toml` files found, then loading the global config (`~/.lapidoc.toml`, or the
//! file named by `LAPIDOC_CONFIG`) with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub use discovery::{CONFIG_ENV, CONFIG_FILENAME, ConfigFile, ConfigScope, Discovery};
pub use error::ConfigError;
use lapidoc_corpus::CorpusSource;
use lapidoc_search::{DEFAULT_DEBOUNCE, IndexPolicy, SearchOptions, Weights};
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDisplaySettings, RawSearchSettings, RawWeights, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_corpus_path;
use serde::Serialize;
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for lapidoc.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.lapidoc.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Resolved corpus file. `None` selects the bundled LAPI documentation.
    pub corpus: Option<PathBuf>,
    /// Search settings.
    pub search: SearchSettings,
    /// Display settings.
    pub display: DisplaySettings,
    /// Config files that contributed, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.lapidoc.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_with(&Discovery::from_env(), cwd)
    }

    /// Loads configuration using an explicit locator.
    pub fn load_with(discovery: &Discovery, cwd: &Path) -> Result<Self, ConfigError> {
        let files: Vec<PathBuf> = discovery.files(cwd).into_iter().map(|f| f.path).collect();
        Self::load_from_files(&files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Where the corpus should be loaded from.
    pub fn corpus_source(&self) -> CorpusSource {
        match &self.corpus {
            Some(path) => CorpusSource::File(path.clone()),
            None => CorpusSource::Bundled,
        }
    }

    /// Engine options derived from the search settings.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.search.limit,
            preview_chars: self.search.preview_chars,
            policy: self.search.indexed_blocks.clone(),
            weights: self.search.weights,
        }
    }

    /// Debounce period for interactive sessions.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// This outputs the merged configuration in the same format as a `.lapidoc.toml` file,
    /// making it easy to see the effective configuration.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableConfig {
            corpus: self.corpus.as_ref().map(|p| p.display().to_string()),
            search: &self.search,
            display: &self.display,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    /// Maximum results per query.
    pub limit: usize,
    /// Preview length in characters, before the ellipsis.
    pub preview_chars: usize,
    /// Quiescence period before a typed query runs, in milliseconds.
    pub debounce_ms: u64,
    /// Block kinds whose content is searched.
    pub indexed_blocks: IndexPolicy,
    /// Per-field score weights.
    pub weights: Weights,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            limit: options.limit,
            preview_chars: options.preview_chars,
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(u64::MAX),
            indexed_blocks: options.policy,
            weights: options.weights,
        }
    }
}

/// Display settings for the terminal viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySettings {
    /// Document shown by `show` when no id is given.
    pub start_page: String,
    /// Language assumed for code blocks that name none.
    pub default_language: String,
    /// Syntax highlighting theme.
    pub theme: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            start_page: String::from("intro"),
            default_language: String::from("lua"),
            theme: String::from("Dracula"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// Corpus path, omitted when bundled.
    #[serde(skip_serializing_if = "Option::is_none")]
    corpus: Option<String>,
    /// Search settings.
    search: &'a SearchSettings,
    /// Display settings.
    display: &'a DisplaySettings,
}
