//! Rendering and JSON serialization for CLI output.

mod document;
mod nav;

use std::process::ExitCode;

pub use document::{render_code_only, render_document, render_rich, render_welcome};
use lapidoc_corpus::BlockKind;
pub use lapidoc_highlight::{bold, dim, subheader};
use lapidoc_search::{DocumentScore, MatchSite, SearchResult};
pub use nav::{NavState, render_nav};
use serde::Serialize;

/// JSON output for one query's results.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as typed.
    query: &'a str,
    /// Ranked results.
    results: &'a [SearchResult],
    /// Number of results returned.
    total_matches: usize,
}

/// Prints search results as pretty JSON.
pub fn output_json_results(query: &str, results: &[SearchResult]) -> ExitCode {
    let output = JsonSearchOutput {
        query,
        results,
        total_matches: results.len(),
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats a ranked result list for the terminal.
///
/// Results are numbered from 1 so interactive sessions can refer to them.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("{}\n", dim("No results found."));
    }

    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {} {}\n",
            i + 1,
            bold(&result.title),
            dim(&format!("[{}] score {}", result.id, result.score))
        ));
        out.push_str(&format!("    {}\n", result.preview));
    }
    out
}

/// Describes where a contribution matched, e.g. `block 3 (list) item 2`.
///
/// Positions are 1-based.
pub fn describe_site(site: &MatchSite) -> String {
    match site {
        MatchSite::Title => "title".to_string(),
        MatchSite::Description => "description".to_string(),
        MatchSite::Block { block, kind } => format!("block {} ({kind})", block + 1),
        MatchSite::Entry { block, kind, entry } => {
            let noun = match kind {
                BlockKind::Heading => "line",
                BlockKind::Table => "row",
                _ => "item",
            };
            format!("block {} ({kind}) {noun} {}", block + 1, entry + 1)
        }
    }
}

/// Formats the scoring breakdown of one document.
pub fn format_breakdown(rank: usize, id: &str, title: &str, score: &DocumentScore) -> String {
    let mut out = format!(
        "{:>2}. {} {}\n",
        rank,
        bold(title),
        dim(&format!("[{id}] score {}", score.score))
    );
    for contribution in &score.contributions {
        out.push_str(&format!(
            "      +{:<3} {}\n",
            contribution.points,
            describe_site(&contribution.site)
        ));
    }
    out
}
