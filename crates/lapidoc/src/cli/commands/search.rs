//! Implementation of `lapidoc search`.

use std::process::ExitCode;

use lapidoc_corpus::Corpus;
use lapidoc_search::{IndexPolicy, Query, SearchOptions, score_document, search_with};

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, format_breakdown, format_results, output_json_results, subheader},
};

/// Searches the corpus and prints ranked results.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = cmd.query.join(" ");

    let mut options = ctx.config.search_options();
    if let Some(limit) = cmd.limit {
        options.limit = limit;
    }
    if cmd.all_blocks {
        options.policy = IndexPolicy::all();
    }

    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    if cmd.explain {
        return explain(corpus, &query, &options);
    }

    let results = search_with(corpus, &query, &options);
    if cmd.json {
        return output_json_results(&query, &results);
    }

    print!("{}", format_results(&results));
    ExitCode::SUCCESS
}

/// Prints the scoring breakdown of every matching document, including those past the limit.
fn explain(corpus: &Corpus, query: &str, options: &SearchOptions) -> ExitCode {
    let Some(parsed) = Query::parse(query) else {
        println!("{}", dim("(empty query)"));
        return ExitCode::SUCCESS;
    };

    println!("{}", subheader("Query:"));
    println!("   {}", parsed.as_str());
    println!();

    let kinds: Vec<&str> = options.policy.kinds().map(|kind| kind.as_str()).collect();
    let w = &options.weights;
    println!("{}", subheader("Search Parameters:"));
    println!("   limit = {}", options.limit);
    println!("   preview_chars = {}", options.preview_chars);
    println!("   indexed_blocks = [{}]", kinds.join(", "));
    println!(
        "   weights = title {}, description {}, paragraph {}, code {}, list_item {}",
        w.title, w.description, w.paragraph, w.code, w.list_item
    );
    println!(
        "             heading {}, subheading {}, table_row {}",
        w.heading, w.subheading, w.table_row
    );
    println!();

    let mut scored: Vec<_> = corpus
        .iter()
        .map(|doc| (doc, score_document(doc, &parsed, options)))
        .filter(|(_, score)| score.score > 0)
        .collect();
    scored.sort_by(|a, b| b.1.score.cmp(&a.1.score));

    println!("{}", subheader("Matches:"));
    if scored.is_empty() {
        println!("   {}", dim("(none)"));
        return ExitCode::SUCCESS;
    }

    for (i, (doc, score)) in scored.iter().enumerate() {
        if i == options.limit {
            println!("{}", dim(&format!("─── limit {} ───", options.limit)));
        }
        print!("{}", format_breakdown(i + 1, &doc.id, &doc.title, score));
    }

    ExitCode::SUCCESS
}
