//! Locating `.lapidoc.toml` files.
//!
//! A [`Discovery`] knows where the global file lives. Project files are found by checking
//! each ancestor of the working directory, nearest first; the global file is consulted
//! last. `LAPIDOC_CONFIG` moves the global file, or disables it when set to an empty string.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use tracing::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".lapidoc.toml";

/// Environment variable that overrides the global configuration file.
pub const CONFIG_ENV: &str = "LAPIDOC_CONFIG";

/// Where a configuration file sits in the precedence chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// Found next to or above the working directory.
    Project,
    /// The user-wide file.
    Global,
}

/// A discovered configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Path to the file.
    pub path: PathBuf,
    /// How the file was found.
    pub scope: ConfigScope,
}

/// Configuration file locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Global file location, if any.
    global: Option<PathBuf>,
}

impl Discovery {
    /// Locator honouring `LAPIDOC_CONFIG`, falling back to `~/.lapidoc.toml`.
    pub fn from_env() -> Self {
        Self::from_override(env::var_os(CONFIG_ENV), || {
            BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
        })
    }

    /// Locator with an explicit global file, or none.
    pub fn with_global(global: Option<PathBuf>) -> Self {
        Self { global }
    }

    /// Applies an override value to the default global location.
    fn from_override(value: Option<OsString>, default: impl FnOnce() -> Option<PathBuf>) -> Self {
        let global = match value {
            Some(value) if value.is_empty() => None,
            Some(value) => Some(PathBuf::from(value)),
            None => default(),
        };
        Self { global }
    }

    /// The global file location, whether or not it exists.
    pub fn global_file(&self) -> Option<&Path> {
        self.global.as_deref()
    }

    /// Returns true if `path` is the global file.
    pub fn is_global(&self, path: &Path) -> bool {
        self.global.as_deref() == Some(path)
    }

    /// Finds configuration files for `cwd`, highest precedence first.
    ///
    /// A file with `root = true` ends the search; nothing above it, including the global
    /// file, is used.
    pub fn files(&self, cwd: &Path) -> Vec<ConfigFile> {
        let mut files = Vec::new();
        for dir in cwd.ancestors() {
            let path = dir.join(CONFIG_FILENAME);
            if !path.is_file() {
                continue;
            }
            let root = is_root_config(&path);
            files.push(self.classify(path));
            if root {
                debug!(root = %dir.display(), "config search stopped at root file");
                return files;
            }
        }

        if let Some(global) = &self.global
            && global.is_file()
            && files.iter().all(|f| f.scope != ConfigScope::Global)
        {
            files.push(ConfigFile {
                path: global.clone(),
                scope: ConfigScope::Global,
            });
        }
        files
    }

    /// Tags a path found during the ancestor walk.
    fn classify(&self, path: PathBuf) -> ConfigFile {
        let scope = if self.is_global(&path) {
            ConfigScope::Global
        } else {
            ConfigScope::Project
        };
        ConfigFile { path, scope }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::Sandbox;

    /// Paths only, in discovery order.
    fn paths(files: &[ConfigFile]) -> Vec<&Path> {
        files.iter().map(|f| f.path.as_path()).collect()
    }

    #[test]
    fn test_no_files_found() {
        let sandbox = Sandbox::new();
        let cwd = sandbox.dir("a/b/c");
        assert!(sandbox.discovery().files(&cwd).is_empty());
    }

    #[test]
    fn test_nearest_file_first_then_global() {
        let sandbox = Sandbox::new();
        let top = sandbox.config("", "");
        let mid = sandbox.config("site", "");
        let global = sandbox.global_config("[search]\nlimit = 3\n");
        let cwd = sandbox.dir("site/docs/lua");

        let files = sandbox.discovery().files(&cwd);
        assert_eq!(paths(&files), vec![&mid, &top, &global]);
        assert_eq!(files[0].scope, ConfigScope::Project);
        assert_eq!(files[2].scope, ConfigScope::Global);
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let sandbox = Sandbox::new();
        fs::create_dir_all(sandbox.path().join(CONFIG_FILENAME)).unwrap();
        let cwd = sandbox.dir("sub");
        assert!(sandbox.discovery().files(&cwd).is_empty());
    }

    #[test]
    fn test_root_file_hides_parents_and_global() {
        let sandbox = Sandbox::new();
        sandbox.config("", "");
        sandbox.global_config("");
        let root = sandbox.config("project", "root = true\n");
        let child = sandbox.config("project/sub", "root = false\n");
        let cwd = sandbox.dir("project/sub/deep");

        let files = sandbox.discovery().files(&cwd);
        assert_eq!(paths(&files), vec![&child, &root]);
    }

    #[test]
    fn test_global_reached_by_walk_is_listed_once() {
        let sandbox = Sandbox::new();
        let global = sandbox.global_config("");
        let cwd = sandbox.dir("home/projects/game");

        let files = sandbox.discovery().files(&cwd);
        assert_eq!(
            files,
            vec![ConfigFile {
                path: global,
                scope: ConfigScope::Global,
            }]
        );
    }

    #[test]
    fn test_missing_global_is_ignored() {
        let sandbox = Sandbox::new();
        let discovery = Discovery::with_global(Some(sandbox.path().join("nowhere.toml")));
        let cwd = sandbox.dir("work");
        assert!(discovery.files(&cwd).is_empty());
    }

    #[test]
    fn test_override_values() {
        let default = || Some(PathBuf::from("/home/me/.lapidoc.toml"));

        let unset = Discovery::from_override(None, default);
        assert_eq!(unset.global_file(), Some(Path::new("/home/me/.lapidoc.toml")));

        let moved = Discovery::from_override(Some("/etc/lapidoc.toml".into()), default);
        assert_eq!(moved.global_file(), Some(Path::new("/etc/lapidoc.toml")));
        assert!(moved.is_global(Path::new("/etc/lapidoc.toml")));

        let disabled = Discovery::from_override(Some(OsString::new()), default);
        assert_eq!(disabled.global_file(), None);
        assert!(!disabled.is_global(Path::new("/home/me/.lapidoc.toml")));
    }
}
