//! Implementation of `lapidoc check`.

use std::{fmt, process::ExitCode};

use lapidoc_config::ConfigWarning;
use lapidoc_corpus::{Corpus, CorpusSource, nav};
use lapidoc_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Exit codes for `lapidoc check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration and corpus are valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// There are warnings but everything is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// The corpus cannot be loaded.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// A problem found by `check`.
#[derive(Debug)]
enum Issue {
    /// A configuration warning.
    Config(ConfigWarning),
    /// A navigation leaf points at no document.
    DanglingNav(String),
    /// `display.start_page` is not a document id.
    UnknownStartPage(String),
    /// `display.theme` is not an embedded theme.
    UnknownTheme(String),
    /// No syntax definition for `display.default_language`.
    UnknownLanguage(String),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(warning) => write!(f, "{warning}"),
            Self::DanglingNav(id) => write!(f, "navigation entry '{id}' has no document"),
            Self::UnknownStartPage(id) => {
                write!(f, "display.start_page '{id}' is not a document id")
            }
            Self::UnknownTheme(name) => write!(f, "display.theme '{name}' is not a known theme"),
            Self::UnknownLanguage(name) => {
                write!(f, "display.default_language '{name}' has no syntax definition")
            }
        }
    }
}

/// Validates configuration and corpus.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("Checking configuration...");
    println!();

    if config.files.is_empty() {
        println!("No configuration files found; using defaults.");
    } else {
        println!("Config files:");
        for path in &config.files {
            println!("  {}", ctx.describe_config_file(path));
        }
    }
    println!();

    let source = config.corpus_source();
    match &source {
        CorpusSource::Bundled => println!("Corpus: bundled LAPI documentation"),
        CorpusSource::File(path) => println!("Corpus: {}", path.display()),
    }

    let mut issues: Vec<Issue> = config.validate().into_iter().map(Issue::Config).collect();

    let corpus = match source.load() {
        Ok(corpus) => corpus,
        Err(e) => {
            println!();
            print_issues(&issues);
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };
    println!(
        "  {} documents, {} navigation entries",
        corpus.len(),
        count_nav_leaves(&corpus)
    );
    println!();

    issues.extend(corpus_issues(ctx, &corpus));

    if issues.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    print_issues(&issues);
    exit_codes::WARNINGS
}

/// Number of leaf entries in the navigation tree.
fn count_nav_leaves(corpus: &Corpus) -> usize {
    nav::leaves(corpus.nav()).len()
}

/// Collects problems that need the loaded corpus to detect.
fn corpus_issues(ctx: &CommandContext, corpus: &Corpus) -> Vec<Issue> {
    let display = &ctx.config.display;
    let mut issues: Vec<Issue> = corpus
        .dangling_nav_ids()
        .into_iter()
        .map(|id| Issue::DanglingNav(id.to_string()))
        .collect();

    if !corpus.contains(&display.start_page) {
        issues.push(Issue::UnknownStartPage(display.start_page.clone()));
    }

    let highlighter = match Highlighter::with_theme(&display.theme) {
        Some(highlighter) => highlighter,
        None => {
            issues.push(Issue::UnknownTheme(display.theme.clone()));
            Highlighter::new()
        }
    };
    if !highlighter.has_syntax(&display.default_language) {
        issues.push(Issue::UnknownLanguage(display.default_language.clone()));
    }

    issues
}

/// Prints the warning list followed by hints.
fn print_issues(issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }

    println!("Warnings ({}):", issues.len());
    for issue in issues {
        println!("  - {issue}");
    }
    println!();

    print_hints(issues);
}

/// Prints hints for resolving common warnings.
fn print_hints(issues: &[Issue]) {
    let mut hints: Vec<&str> = issues
        .iter()
        .map(|issue| match issue {
            Issue::Config(ConfigWarning::ZeroLimit) => "Set search.limit to at least 1.",
            Issue::Config(ConfigWarning::ZeroPreviewChars) => {
                "Set search.preview_chars to at least 1."
            }
            Issue::Config(ConfigWarning::EmptyIndexPolicy) => {
                "List block kinds in search.indexed_blocks, or use \"all\"."
            }
            Issue::Config(
                ConfigWarning::CorpusFileMissing { .. } | ConfigWarning::CorpusNotAFile { .. },
            ) => "Point corpus at a TOML file, or remove it to use the bundled documentation.",
            Issue::DanglingNav(_) => "Add the missing documents or remove the navigation entries.",
            Issue::UnknownStartPage(_) => "Set display.start_page to a document id.",
            Issue::UnknownTheme(_) => "Choose an embedded theme such as \"Dracula\".",
            Issue::UnknownLanguage(_) => {
                "Set display.default_language to a known syntax, e.g. \"lua\"."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}

#[cfg(test)]
mod tests {
    use lapidoc_config::Config;

    use super::*;

    fn context(config: Config) -> CommandContext {
        let mut ctx = CommandContext::load_cwd_only().unwrap();
        ctx.config = config;
        ctx
    }

    #[test]
    fn default_config_has_no_corpus_issues() {
        let ctx = context(Config::default());
        let issues = corpus_issues(&ctx, &Corpus::bundled());
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn bad_display_settings_are_reported() {
        let mut config = Config::default();
        config.display.start_page = "nowhere".into();
        config.display.theme = "no-such-theme".into();
        config.display.default_language = "no-such-language".into();
        let ctx = context(config);
        let issues = corpus_issues(&ctx, &Corpus::bundled());
        assert_eq!(issues.len(), 3);
        assert!(issues[0].to_string().contains("nowhere"));
    }
}
