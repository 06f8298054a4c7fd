//! Error types for corpus loading.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading a documentation corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Failed to read a corpus file.
    #[error("failed to read corpus file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a corpus file.
    #[error("failed to parse corpus file {path}: {source}")]
    ParseToml {
        /// Path (or label) of the source being parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// Two documents share the same id.
    #[error("duplicate document id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// A document has an empty id.
    #[error("document '{title}' has an empty id")]
    EmptyId {
        /// Title of the offending document.
        title: String,
    },

    /// A block kind name was not recognized.
    #[error("unknown block kind: {name}")]
    UnknownBlockKind {
        /// The unrecognized name.
        name: String,
    },
}
