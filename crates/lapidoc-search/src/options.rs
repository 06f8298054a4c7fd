//! Search options: result limits, preview length, scoring weights, and which block kinds
//! are indexed.

use std::collections::BTreeSet;

use lapidoc_corpus::BlockKind;
use serde::Serialize;

/// Default maximum number of results.
pub const DEFAULT_LIMIT: usize = 8;

/// Default preview length in characters, before the ellipsis.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// The set of block kinds whose content contributes to score and preview.
///
/// Title and description are always searched; this only governs block content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IndexPolicy {
    /// Indexed kinds.
    kinds: BTreeSet<BlockKind>,
}

impl IndexPolicy {
    /// Paragraphs, code samples and list items. Headings, subheadings and tables are not
    /// searched.
    pub fn legacy() -> Self {
        Self::from_kinds([BlockKind::Paragraph, BlockKind::Code, BlockKind::List])
    }

    /// Every block kind.
    pub fn all() -> Self {
        Self::from_kinds(BlockKind::ALL)
    }

    /// No block content; only titles and descriptions are searched.
    pub fn none() -> Self {
        Self {
            kinds: BTreeSet::new(),
        }
    }

    /// Builds a policy from an explicit list of kinds.
    pub fn from_kinds(kinds: impl IntoIterator<Item = BlockKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Returns true if blocks of `kind` are searched.
    pub fn indexes(&self, kind: BlockKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Iterates the indexed kinds in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = BlockKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Returns true if no block kind is indexed.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for IndexPolicy {
    fn default() -> Self {
        Self::legacy()
    }
}

/// Points awarded per matching field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Weights {
    /// Title contains the query.
    pub title: u32,
    /// Description contains the query.
    pub description: u32,
    /// Per matching paragraph block.
    pub paragraph: u32,
    /// Per matching code block.
    pub code: u32,
    /// Per matching list item.
    pub list_item: u32,
    /// Per matching heading line.
    pub heading: u32,
    /// Per matching subheading block.
    pub subheading: u32,
    /// Per matching table row.
    pub table_row: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            title: 10,
            description: 5,
            paragraph: 3,
            code: 2,
            list_item: 2,
            heading: 2,
            subheading: 2,
            table_row: 1,
        }
    }
}

/// Everything the engine needs besides the corpus and the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results returned.
    pub limit: usize,
    /// Previews longer than this many characters are truncated.
    pub preview_chars: usize,
    /// Which block kinds are searched.
    pub policy: IndexPolicy,
    /// Points per matching field.
    pub weights: Weights,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            policy: IndexPolicy::default(),
            weights: Weights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_policy_skips_structural_blocks() {
        let policy = IndexPolicy::legacy();
        assert!(policy.indexes(BlockKind::Paragraph));
        assert!(policy.indexes(BlockKind::Code));
        assert!(policy.indexes(BlockKind::List));
        assert!(!policy.indexes(BlockKind::Heading));
        assert!(!policy.indexes(BlockKind::Subheading));
        assert!(!policy.indexes(BlockKind::Table));
    }

    #[test]
    fn all_policy_covers_every_kind() {
        let policy = IndexPolicy::all();
        assert!(BlockKind::ALL.iter().all(|k| policy.indexes(*k)));
        assert!(IndexPolicy::none().is_empty());
    }

    #[test]
    fn defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.limit, 8);
        assert_eq!(options.preview_chars, 100);
        assert_eq!(options.policy, IndexPolicy::legacy());
        assert_eq!(options.weights.title, 10);
        assert_eq!(options.weights.description, 5);
        assert_eq!(options.weights.paragraph, 3);
        assert_eq!(options.weights.code, 2);
        assert_eq!(options.weights.list_item, 2);
    }

    #[test]
    fn policy_serializes_as_kind_names() {
        let json = serde_json::to_string(&IndexPolicy::legacy()).unwrap();
        assert_eq!(json, r#"["paragraph","code","list"]"#);
    }
}
