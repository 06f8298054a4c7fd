//! Clap argument definitions for the `lapidoc` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "lapidoc")]
#[command(about = "LAPI documentation viewer and search")]
pub struct Cli {
    /// Log verbosity (-v for info, -vv for debug). LAPIDOC_LOG overrides.
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `lapidoc search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search query; multiple words are joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum results to return [default: 8]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Also search headings, subheadings and tables
    #[arg(long)]
    pub all_blocks: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show how every matching document was scored
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `lapidoc show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Document id [default: display.start_page]
    pub id: Option<String>,

    /// Print only the code samples, verbatim
    #[arg(long)]
    pub raw_code: bool,
}

/// Arguments for `lapidoc nav`.
#[derive(Args, Debug, Clone, Default)]
pub struct NavCommand {
    /// Mark this document as the active page
    #[arg(long)]
    pub active: Option<String>,

    /// Expand a navigation group (can be specified multiple times)
    #[arg(long)]
    pub expand: Vec<String>,

    /// Collapse a navigation group (can be specified multiple times)
    #[arg(long)]
    pub collapse: Vec<String>,
}

/// Arguments for `lapidoc browse`.
#[derive(Args, Debug, Clone, Default)]
pub struct BrowseCommand {
    /// Quiet period before a typed query runs [default: search.debounce_ms]
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Document to start on [default: display.start_page]
    #[arg(long)]
    pub start: Option<String>,
}

/// Arguments for `lapidoc init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.lapidoc.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `lapidoc` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the documentation and print ranked results
    #[command(after_help = "\
MATCHING:
  Case-insensitive substring match against titles, descriptions and block text.
  Title +10, description +5, paragraph +3, code +2, list item +2.

EXAMPLES:
  lapidoc search install
  lapidoc search get_velocity --json
  lapidoc search slider --all-blocks --explain")]
    Search(SearchCommand),
    /// Render a documentation page
    Show(ShowCommand),
    /// Show the navigation tree
    Nav(NavCommand),
    /// Interactive session: type queries, open results, navigate
    #[command(after_help = "\
INPUT:
  <text>            Set the search input to <text> (an empty line clears it)
  :open N           Open result N from the last result list
  :go ID            Activate a page, or toggle a navigation group
  :focus            Focus the search input (re-shows stale results)
  :k                Press Cmd/Ctrl+K
  :click-outside    Click outside the search box
  :esc              Press Escape
  :menu             Open the navigation overlay
  :nav              Show the navigation tree
  :q                Quit")]
    Browse(BrowseCommand),
    /// Initialize lapidoc configuration in current directory
    Init(InitCommand),
    /// Show effective configuration settings
    Config,
    /// Validate configuration and corpus
    Check,
}
