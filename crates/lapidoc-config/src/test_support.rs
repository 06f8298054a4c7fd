//! Scratch directory trees for lapidoc-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::{CONFIG_FILENAME, Discovery};

/// Smallest corpus file that loads.
pub const MINIMAL_CORPUS: &str = "[[documents]]\nid = \"intro\"\ntitle = \"Introduction\"\n";

/// A temporary tree with its own `home/` directory for the global config.
pub struct Sandbox {
    /// Removed on drop.
    root: TempDir,
}

impl Sandbox {
    /// Creates an empty sandbox.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates `rel` and its parents.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes [`MINIMAL_CORPUS`] to `rel`.
    pub fn corpus(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, MINIMAL_CORPUS).unwrap();
        path
    }

    /// Writes `.lapidoc.toml` into the directory `rel`.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes the sandbox's global config.
    pub fn global_config(&self, content: &str) -> PathBuf {
        self.config("home", content)
    }

    /// Locator whose global file is `home/.lapidoc.toml` inside the sandbox.
    pub fn discovery(&self) -> Discovery {
        Discovery::with_global(Some(self.root.path().join("home").join(CONFIG_FILENAME)))
    }
}
