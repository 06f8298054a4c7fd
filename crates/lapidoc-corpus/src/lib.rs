//! Documentation corpus for lapidoc.
//!
//! This crate defines the read-only data that the viewer renders and the search engine
//! scans:
//! - [`Document`]: a titled section with an ordered list of [`Block`]s
//! - [`RichText`]: inline-styled text, parsed from Markdown at load time
//! - [`NavItem`]: the sidebar navigation forest
//! - [`Corpus`]: an ordered, id-addressable collection, loaded from TOML or bundled

#![warn(missing_docs)]

mod block;
mod corpus;
mod error;
pub mod nav;
mod rich;

pub use block::{Block, BlockKind};
pub use corpus::{Corpus, CorpusSource};
pub use error::CorpusError;
pub use nav::NavItem;
pub use rich::{RichText, Span};
use serde::{Deserialize, Serialize};

/// One section of documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable section id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional summary shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Content blocks in reading order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    /// Creates a document with no description and no blocks.
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            blocks: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Appends a block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new("utils", "Utils")
            .with_description("Helpers")
            .with_block(Block::code("utils.name()"));
        assert_eq!(doc.id, "utils");
        assert_eq!(doc.description.as_deref(), Some("Helpers"));
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_document_without_blocks_deserializes() {
        let doc: Document = toml::from_str("id = \"x\"\ntitle = \"X\"").unwrap();
        assert!(doc.blocks.is_empty());
        assert!(doc.description.is_none());
    }
}
