//! The search and ranking engine.
//!
//! Search is a pure function of `(corpus, query, options)`. There is no persistent index:
//! every call rescans the corpus, which is small (tens of sections) and immutable.
//!
//! Scoring is additive. Each field that contains the case-folded query contributes its
//! weight independently:
//!
//! | Field | Default points | Preview |
//! |---|---|---|
//! | title | 10 | always the title |
//! | description | 5 | if unset |
//! | paragraph block | 3 each | plain text, if unset |
//! | code block | 2 each | raw code, if unset |
//! | list item | 2 each | plain text, if unset |
//! | heading line | 2 each | line, if unset |
//! | subheading | 2 each | plain text, if unset |
//! | table row | 1 each | cells joined with ` \| `, if unset |
//!
//! Only kinds enabled by the [`IndexPolicy`](crate::IndexPolicy) are scanned; the default
//! policy scans paragraphs, code and lists.

use lapidoc_corpus::{Block, BlockKind, Corpus, Document, RichText};
use serde::Serialize;
use tracing::debug;

use crate::{
    SearchOptions,
    preview::{NO_PREVIEW, truncate_preview},
};

/// A ranked match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Document id.
    pub id: String,
    /// Document title.
    pub title: String,
    /// Representative snippet, at most `preview_chars` plus an ellipsis.
    pub preview: String,
    /// Summed match points. Used for ordering, not for display.
    pub score: u32,
}

/// A case-folded query that is not blank.
///
/// Surrounding whitespace only decides blankness; it is kept for matching, so `" install"`
/// needs the space to be present in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Lowercased query text.
    folded: String,
}

impl Query {
    /// Parses raw input. Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self {
            folded: raw.to_lowercase(),
        })
    }

    /// Returns the folded query text.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Returns true if `text` contains the query, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

/// Which part of a document produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum MatchSite {
    /// The document title.
    Title,
    /// The document description.
    Description,
    /// A whole block (paragraph, code, subheading).
    Block {
        /// Block position in the document.
        block: usize,
        /// Kind of the block.
        kind: BlockKind,
    },
    /// One entry inside a block (list item, heading line, table row).
    Entry {
        /// Block position in the document.
        block: usize,
        /// Kind of the block.
        kind: BlockKind,
        /// Entry position inside the block.
        entry: usize,
    },
}

/// A single scoring contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// Where the match occurred.
    #[serde(flatten)]
    pub site: MatchSite,
    /// Points awarded.
    pub points: u32,
}

/// The full scoring breakdown for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocumentScore {
    /// Sum of all contribution points.
    pub score: u32,
    /// Preview chosen during scoring, before fallback and truncation.
    pub preview: Option<String>,
    /// Every contribution in discovery order.
    pub contributions: Vec<Contribution>,
}

impl DocumentScore {
    /// Records a contribution.
    fn add(&mut self, site: MatchSite, points: u32) {
        self.score += points;
        self.contributions.push(Contribution { site, points });
    }

    /// Sets the preview unless one was already chosen.
    fn offer_preview(&mut self, text: impl FnOnce() -> String) {
        if self.preview.is_none() {
            self.preview = Some(text());
        }
    }
}

/// Searches with default options.
pub fn search(corpus: &Corpus, query: &str) -> Vec<SearchResult> {
    search_with(corpus, query, &SearchOptions::default())
}

/// Searches the corpus and returns at most `options.limit` results.
///
/// Results are ordered by descending score; equal scores keep corpus order. Empty or
/// whitespace-only queries return no results.
pub fn search_with(corpus: &Corpus, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    let Some(query) = Query::parse(query) else {
        return Vec::new();
    };

    let mut results: Vec<SearchResult> = corpus
        .iter()
        .filter_map(|doc| {
            let scored = score_document(doc, &query, options);
            (scored.score > 0).then(|| to_result(doc, scored, options.preview_chars))
        })
        .collect();

    let matched = results.len();
    // `sort_by` is stable, so equal scores stay in corpus order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(options.limit);

    debug!(
        query = query.as_str(),
        matched,
        returned = results.len(),
        "search executed"
    );
    results
}

/// Scores a single document against a query.
pub fn score_document(doc: &Document, query: &Query, options: &SearchOptions) -> DocumentScore {
    let weights = &options.weights;
    let mut scored = DocumentScore::default();

    if query.matches(&doc.title) {
        scored.add(MatchSite::Title, weights.title);
        scored.preview = Some(doc.title.clone());
    }

    if let Some(description) = &doc.description
        && query.matches(description)
    {
        scored.add(MatchSite::Description, weights.description);
        scored.offer_preview(|| description.clone());
    }

    for (index, block) in doc.blocks.iter().enumerate() {
        if !options.policy.indexes(block.kind()) {
            continue;
        }
        score_block(&mut scored, index, block, query, options);
    }

    scored
}

/// Adds the contributions of one block.
fn score_block(
    scored: &mut DocumentScore,
    index: usize,
    block: &Block,
    query: &Query,
    options: &SearchOptions,
) {
    let weights = &options.weights;
    let kind = block.kind();
    let whole = MatchSite::Block { block: index, kind };
    let entry = |entry: usize| MatchSite::Entry {
        block: index,
        kind,
        entry,
    };

    match block {
        Block::Paragraph { content } => {
            score_rich(scored, whole, content, query, weights.paragraph);
        }
        Block::Subheading { content } => {
            score_rich(scored, whole, content, query, weights.subheading);
        }
        Block::Code { content, .. } => {
            if query.matches(content) {
                scored.add(whole, weights.code);
                scored.offer_preview(|| content.clone());
            }
        }
        Block::List { items } => {
            for (i, item) in items.iter().enumerate() {
                score_rich(scored, entry(i), item, query, weights.list_item);
            }
        }
        Block::Heading { lines } => {
            for (i, line) in lines.iter().enumerate() {
                if query.matches(line) {
                    scored.add(entry(i), weights.heading);
                    scored.offer_preview(|| line.clone());
                }
            }
        }
        Block::Table { rows, .. } => {
            for (i, row) in rows.iter().enumerate() {
                let text = row
                    .iter()
                    .map(RichText::plain_text)
                    .collect::<Vec<_>>()
                    .join(" | ");
                if query.matches(&text) {
                    scored.add(entry(i), weights.table_row);
                    scored.offer_preview(|| text);
                }
            }
        }
    }
}

/// Scores a rich-text field against its plain text.
fn score_rich(
    scored: &mut DocumentScore,
    site: MatchSite,
    content: &RichText,
    query: &Query,
    points: u32,
) {
    let text = content.plain_text();
    if query.matches(&text) {
        scored.add(site, points);
        scored.offer_preview(|| text);
    }
}

/// Builds the public result, applying preview fallback and truncation.
fn to_result(doc: &Document, scored: DocumentScore, preview_chars: usize) -> SearchResult {
    let preview = scored
        .preview
        .or_else(|| doc.description.clone())
        .unwrap_or_else(|| NO_PREVIEW.to_string());

    SearchResult {
        id: doc.id.clone(),
        title: doc.title.clone(),
        preview: truncate_preview(&preview, preview_chars),
        score: scored.score,
    }
}
