//! Content blocks.
//!
//! A document body is an ordered sequence of [`Block`]s. The set of block kinds is closed;
//! consumers dispatch with an exhaustive `match`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CorpusError, RichText};

/// The kind of a content block, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Prose paragraph.
    Paragraph,
    /// Code sample.
    Code,
    /// Bulleted list.
    List,
    /// One or more heading lines.
    Heading,
    /// Quoted sub-heading note.
    Subheading,
    /// Reference table.
    Table,
}

impl BlockKind {
    /// Every block kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Paragraph,
        Self::Code,
        Self::List,
        Self::Heading,
        Self::Subheading,
        Self::Table,
    ];

    /// Returns the canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Code => "code",
            Self::List => "list",
            Self::Heading => "heading",
            Self::Subheading => "subheading",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| CorpusError::UnknownBlockKind {
                name: s.to_string(),
            })
    }
}

/// A typed unit of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A prose paragraph.
    Paragraph {
        /// Paragraph text.
        content: RichText,
    },
    /// A code sample, kept verbatim.
    Code {
        /// Source text.
        content: String,
        /// Language tag for highlighting.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// Caption shown above the sample.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// A bulleted list.
    List {
        /// List items in order.
        items: Vec<RichText>,
    },
    /// Heading lines.
    Heading {
        /// Each line is rendered as its own heading.
        lines: Vec<String>,
    },
    /// A quoted note under a heading.
    Subheading {
        /// Note text.
        content: RichText,
    },
    /// A reference table.
    Table {
        /// Column headers.
        header: Vec<String>,
        /// Data rows; each row is an ordered list of cells.
        #[serde(default)]
        rows: Vec<Vec<RichText>>,
    },
}

impl Block {
    /// Returns the kind of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::Code { .. } => BlockKind::Code,
            Self::List { .. } => BlockKind::List,
            Self::Heading { .. } => BlockKind::Heading,
            Self::Subheading { .. } => BlockKind::Subheading,
            Self::Table { .. } => BlockKind::Table,
        }
    }

    /// Builds a paragraph from inline Markdown.
    pub fn paragraph(source: &str) -> Self {
        Self::Paragraph {
            content: RichText::parse(source),
        }
    }

    /// Builds an untitled code block with no language tag.
    pub fn code(content: &str) -> Self {
        Self::Code {
            content: content.to_string(),
            language: None,
            title: None,
        }
    }

    /// Builds a list from inline Markdown items.
    pub fn list(items: &[&str]) -> Self {
        Self::List {
            items: items.iter().map(|item| RichText::parse(item)).collect(),
        }
    }

    /// Builds a single-line heading.
    pub fn heading(line: &str) -> Self {
        Self::Heading {
            lines: vec![line.to_string()],
        }
    }

    /// Builds a subheading from inline Markdown.
    pub fn subheading(source: &str) -> Self {
        Self::Subheading {
            content: RichText::parse(source),
        }
    }

    /// Builds a table from a header row and inline Markdown cells.
    pub fn table(header: &[&str], rows: &[&[&str]]) -> Self {
        Self::Table {
            header: header.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| RichText::parse(cell)).collect())
                .collect(),
        }
    }
}
