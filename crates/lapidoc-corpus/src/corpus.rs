//! Corpus loading and lookup.
//!
//! A corpus file is TOML with two top-level arrays:
//!
//! ```toml
//! [[nav]]
//! id = "getting-started"
//! label = "Getting Started"
//! children = [{ id = "intro", label = "Introduction" }]
//!
//! [[documents]]
//! id = "intro"
//! title = "Introduction"
//!
//! [[documents.blocks]]
//! type = "paragraph"
//! content = "Hello from `lapi`."
//! ```
//!
//! Document order in the file is the corpus enumeration order.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    slice,
};

use serde::Deserialize;
use tracing::debug;

use crate::{CorpusError, Document, NavItem, nav};

/// The LAPI documentation shipped with the binary.
const BUNDLED_SOURCE: &str = include_str!("../data/lapi.toml");

/// Label used in place of a path for the bundled corpus.
const BUNDLED_LABEL: &str = "<bundled>";

/// On-disk corpus layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCorpus {
    /// Navigation forest.
    nav: Vec<NavItem>,
    /// Documents in enumeration order.
    documents: Vec<Document>,
}

/// An immutable, ordered collection of documents plus the navigation tree.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Documents in enumeration order.
    documents: Vec<Document>,
    /// Position of each document by id.
    by_id: HashMap<String, usize>,
    /// Navigation forest.
    nav: Vec<NavItem>,
}

impl Corpus {
    /// Builds a corpus, rejecting empty or duplicate ids.
    pub fn new(documents: Vec<Document>, nav: Vec<NavItem>) -> Result<Self, CorpusError> {
        let mut by_id = HashMap::with_capacity(documents.len());
        for (position, doc) in documents.iter().enumerate() {
            if doc.id.is_empty() {
                return Err(CorpusError::EmptyId {
                    title: doc.title.clone(),
                });
            }
            if by_id.insert(doc.id.clone(), position).is_some() {
                return Err(CorpusError::DuplicateId { id: doc.id.clone() });
            }
        }
        Ok(Self {
            documents,
            by_id,
            nav,
        })
    }

    /// Returns the LAPI documentation bundled with lapidoc.
    pub fn bundled() -> Self {
        Self::from_toml_str(BUNDLED_SOURCE, Path::new(BUNDLED_LABEL))
            .expect("bundled corpus should be valid")
    }

    /// Loads a corpus file from disk.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let contents = fs::read_to_string(path).map_err(|source| CorpusError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Parses a corpus from TOML. `origin` is used for error reporting.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, CorpusError> {
        let raw: RawCorpus = toml::from_str(contents).map_err(|source| CorpusError::ParseToml {
            path: origin.to_path_buf(),
            source,
        })?;
        let corpus = Self::new(raw.documents, raw.nav)?;
        debug!(
            origin = %origin.display(),
            documents = corpus.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Looks up a document by id. Unknown ids yield `None`.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&i| &self.documents[i])
    }

    /// Returns true if a document with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Iterates documents in enumeration order.
    pub fn iter(&self) -> slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the navigation forest.
    pub fn nav(&self) -> &[NavItem] {
        &self.nav
    }

    /// Returns navigation leaves whose id has no matching document.
    pub fn dangling_nav_ids(&self) -> Vec<&str> {
        nav::leaves(&self.nav)
            .into_iter()
            .map(|item| item.id.as_str())
            .filter(|id| !self.contains(id))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Where a corpus came from, for status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// The built-in LAPI documentation.
    Bundled,
    /// A corpus file on disk.
    File(PathBuf),
}

impl CorpusSource {
    /// Loads the corpus this source points at.
    pub fn load(&self) -> Result<Corpus, CorpusError> {
        match self {
            Self::Bundled => Ok(Corpus::bundled()),
            Self::File(path) => Corpus::load(path),
        }
    }
}
