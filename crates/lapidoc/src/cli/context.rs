//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use lapidoc_config::{Config, Discovery};
use lapidoc_corpus::Corpus;
use lapidoc_highlight::Highlighter;
use tracing::warn;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Config file locator for this invocation.
    pub discovery: Discovery,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Corpus loaded on first use.
    corpus: Option<Corpus>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let discovery = Discovery::from_env();
        let config = load_config_or_failure(&discovery, &cwd)?;
        Ok(Self {
            cwd,
            discovery,
            config,
            corpus: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            discovery: Discovery::from_env(),
            config: Config::default(),
            corpus: None,
        })
    }

    /// Returns the configured corpus, loading it on first call.
    pub fn corpus(&mut self) -> Result<&Corpus, ExitCode> {
        match &mut self.corpus {
            Some(corpus) => Ok(corpus),
            slot @ None => {
                let corpus = self.config.corpus_source().load().map_err(|e| {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                })?;
                Ok(slot.insert(corpus))
            }
        }
    }

    /// Labels a contributing config file for display.
    pub fn describe_config_file(&self, path: &Path) -> String {
        if self.discovery.is_global(path) {
            format!("{} (global)", path.display())
        } else {
            path.display().to_string()
        }
    }

    /// Returns a highlighter using the configured theme.
    ///
    /// An unknown theme name falls back to the default theme.
    pub fn highlighter(&self) -> Highlighter {
        let theme = &self.config.display.theme;
        Highlighter::with_theme(theme).unwrap_or_else(|| {
            warn!(theme = %theme, "unknown theme, using default");
            Highlighter::new()
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(discovery: &Discovery, cwd: &Path) -> Result<Config, ExitCode> {
    Config::load_with(discovery, cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
