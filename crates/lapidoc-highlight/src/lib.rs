//! Syntax highlighting and terminal colors for lapidoc.
//!
//! This crate provides syntax-highlighted output for Lua samples and configuration, plus
//! the styled terminal output used for headers, inline rich text, and status messages.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "Dracula";

/// A syntax highlighter that can highlight code for terminal output.
pub struct Highlighter {
    /// The syntax set containing language definitions (Lua, TOML, and friends).
    syntax_set: SyntaxSet,
    /// The theme set containing color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Creates a highlighter using the named theme, matched case-insensitively.
    ///
    /// Returns `None` if no embedded theme has that name.
    pub fn with_theme(name: &str) -> Option<Self> {
        let theme = find_theme(name)?;
        Some(Self {
            theme,
            ..Self::new()
        })
    }

    /// Highlights TOML content for terminal output.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights content with the specified syntax for terminal output.
    ///
    /// The syntax is looked up by extension, then by name. Unknown syntaxes fall back to
    /// plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let mut output = String::new();
        for line in self.highlight_lines(content, syntax_name) {
            output.push_str(&line);
        }
        // Reset terminal colors at the end
        output.push_str(colors::RESET);
        output
    }

    /// Highlights content with a dimmed, right-aligned line number gutter.
    pub fn highlight_numbered(&self, content: &str, syntax_name: &str) -> String {
        let lines = self.highlight_lines(content, syntax_name);
        let width = lines.len().to_string().len();

        let mut output = String::new();
        for (i, line) in lines.iter().enumerate() {
            output.push_str(&dim(&format!("{:>width$} │ ", i + 1)));
            output.push_str(line);
            if !line.ends_with('\n') {
                output.push('\n');
            }
        }
        output.push_str(colors::RESET);
        output
    }

    /// Returns true if a syntax definition exists for `syntax_name`.
    pub fn has_syntax(&self, syntax_name: &str) -> bool {
        self.find_syntax(syntax_name).is_some()
    }

    /// Returns the name of the active theme.
    pub fn theme_name(&self) -> &'static str {
        self.theme.as_name()
    }

    /// Highlights each line, keeping line endings.
    fn highlight_lines(&self, content: &str, syntax_name: &str) -> Vec<String> {
        let syntax = self
            .find_syntax(syntax_name)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        LinesWithEndings::from(content)
            .map(|line| {
                let ranges: Vec<(Style, &str)> = highlighter
                    .highlight_line(line, &self.syntax_set)
                    .unwrap_or_else(|_| vec![(Style::default(), line)]);
                as_24_bit_terminal_escaped(&ranges[..], false)
            })
            .collect()
    }

    /// Looks a syntax up by extension, then by case-insensitive name.
    fn find_syntax(&self, syntax_name: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| {
                self.syntax_set
                    .syntaxes()
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(syntax_name))
            })
    }
}

/// Finds an embedded theme by case-insensitive name.
fn find_theme(name: &str) -> Option<EmbeddedThemeName> {
    EmbeddedLazyThemeSet::theme_names()
        .iter()
        .copied()
        .find(|theme| theme.as_name().eq_ignore_ascii_case(name))
}

/// Returns the names of all embedded themes.
pub fn theme_names() -> Vec<&'static str> {
    EmbeddedLazyThemeSet::theme_names()
        .iter()
        .map(|theme| theme.as_name())
        .collect()
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Italic text.
    pub const ITALIC: &str = "\x1b[3m";
    /// Underlined text.
    pub const UNDERLINE: &str = "\x1b[4m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Blue text (for links).
    pub const BLUE: &str = "\x1b[34m";
    /// Magenta text (for inline code).
    pub const MAGENTA: &str = "\x1b[35m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (for errors).
    pub const RED: &str = "\x1b[31m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    bold(text)
}

/// Formats text as bold.
pub fn bold(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as italic.
pub fn italic(text: &str) -> String {
    format!("{}{}{}", colors::ITALIC, text, colors::RESET)
}

/// Formats inline code.
pub fn code(text: &str) -> String {
    format!("{}{}{}", colors::MAGENTA, text, colors::RESET)
}

/// Formats a link as underlined text followed by its dimmed target.
pub fn link(text: &str, url: &str) -> String {
    format!(
        "{}{}{}{} {}",
        colors::UNDERLINE,
        colors::BLUE,
        text,
        colors::RESET,
        dim(&format!("<{url}>"))
    )
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Formats text as an error (red).
pub fn error(text: &str) -> String {
    format!("{}{}{}", colors::RED, text, colors::RESET)
}

/// Returns a dimmed horizontal rule for visual separation.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}
