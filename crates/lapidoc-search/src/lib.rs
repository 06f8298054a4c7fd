//! Search for the lapidoc corpus.
//!
//! Two layers:
//! - [`engine`]: a pure ranking function over a [`Corpus`](lapidoc_corpus::Corpus)
//! - [`SearchSession`]: the debounced query controller that feeds it
//!
//! ```
//! use lapidoc_corpus::Corpus;
//!
//! let corpus = Corpus::bundled();
//! let results = lapidoc_search::search(&corpus, "install");
//! assert_eq!(results[0].id, "installation");
//! ```

#![warn(missing_docs)]

mod debounce;
pub mod engine;
mod keys;
mod options;
mod preview;
mod session;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer, Fired};
pub use engine::{
    Contribution, DocumentScore, MatchSite, Query, SearchResult, score_document, search,
    search_with,
};
pub use keys::{Key, KeyPress, Shortcut, shortcut_for};
pub use options::{DEFAULT_LIMIT, DEFAULT_PREVIEW_CHARS, IndexPolicy, SearchOptions, Weights};
pub use preview::{ELLIPSIS, NO_PREVIEW, truncate_preview};
pub use session::{Effect, SearchSession};
