//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving paths.

use std::path::{Path, PathBuf};

use lapidoc_corpus::BlockKind;
use lapidoc_search::{IndexPolicy, Weights};
use tracing::debug;

use crate::{
    Config, ConfigError, DisplaySettings, SearchSettings,
    parse::{RawConfig, RawDisplaySettings, RawSearchSettings, RawWeights},
    resolve::resolve_corpus_path,
};

/// Shorthand accepted by `indexed_blocks` for every block kind.
const ALL_BLOCKS: &str = "all";

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory holding the config file, against which relative paths resolve.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), lowest precedence last (global config). Every setting takes the
/// first defined value.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let corpus = merge_corpus(configs)?;
    let search = merge_search_settings(configs)?;
    let display = merge_display_settings(configs);
    let files = configs.iter().map(|c| c.path.clone()).collect();

    debug!(files = configs.len(), "configuration merged");

    Ok(Config {
        corpus,
        search,
        display,
        files,
    })
}

/// Takes the first defined corpus path, resolved against its own config's directory.
fn merge_corpus(configs: &[ParsedConfig]) -> Result<Option<PathBuf>, ConfigError> {
    configs
        .iter()
        .find_map(|parsed| {
            parsed
                .config
                .corpus
                .as_deref()
                .map(|path| resolve_corpus_path(path, parsed.dir()))
        })
        .transpose()
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> Result<SearchSettings, ConfigError> {
    let mut result = SearchSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search, &parsed.path)?;
        }
    }

    Ok(result)
}

/// Applies raw search settings to result, overwriting any present values.
fn apply_raw_search(
    result: &mut SearchSettings,
    raw: &RawSearchSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.preview_chars {
        result.preview_chars = v;
    }
    if let Some(v) = raw.debounce_ms {
        result.debounce_ms = v;
    }
    if let Some(ref names) = raw.indexed_blocks {
        result.indexed_blocks = parse_policy(names, path)?;
    }
    if let Some(ref weights) = raw.weights {
        apply_raw_weights(&mut result.weights, weights);
    }
    Ok(())
}

/// Converts block kind names into an index policy.
fn parse_policy(names: &[String], path: &Path) -> Result<IndexPolicy, ConfigError> {
    if names.iter().any(|n| n.trim().eq_ignore_ascii_case(ALL_BLOCKS)) {
        return Ok(IndexPolicy::all());
    }
    let kinds = names
        .iter()
        .map(|name| {
            name.parse::<BlockKind>()
                .map_err(|_| ConfigError::UnknownBlockKind {
                    path: path.to_path_buf(),
                    name: name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(IndexPolicy::from_kinds(kinds))
}

/// Applies raw weights, field by field.
fn apply_raw_weights(result: &mut Weights, raw: &RawWeights) {
    let fields = [
        (&mut result.title, raw.title),
        (&mut result.description, raw.description),
        (&mut result.paragraph, raw.paragraph),
        (&mut result.code, raw.code),
        (&mut result.list_item, raw.list_item),
        (&mut result.heading, raw.heading),
        (&mut result.subheading, raw.subheading),
        (&mut result.table_row, raw.table_row),
    ];
    for (slot, value) in fields {
        if let Some(v) = value {
            *slot = v;
        }
    }
}

/// Merges display settings.
fn merge_display_settings(configs: &[ParsedConfig]) -> DisplaySettings {
    let mut result = DisplaySettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref display) = parsed.config.display {
            apply_raw_display(&mut result, display);
        }
    }

    result
}

/// Applies raw display settings to result.
fn apply_raw_display(result: &mut DisplaySettings, raw: &RawDisplaySettings) {
    if let Some(ref v) = raw.start_page {
        result.start_page = v.clone();
    }
    if let Some(ref v) = raw.default_language {
        result.default_language = v.clone();
    }
    if let Some(ref v) = raw.theme {
        result.theme = v.clone();
    }
}
