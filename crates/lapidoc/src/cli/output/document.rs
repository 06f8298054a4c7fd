//! Page rendering.

use comfy_table::{Attribute, Cell, Table, presets::UTF8_FULL_CONDENSED};
use lapidoc_corpus::{Block, Document, RichText, Span};
use lapidoc_highlight::{
    Highlighter, bold, code, colors, dim, header, italic, link, rule, subheader,
};

/// Width of horizontal rules.
const RULE_WIDTH: usize = 60;

/// Renders inline rich text with terminal styling.
pub fn render_rich(text: &RichText) -> String {
    text.spans()
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Strong(text) => bold(text),
            Span::Emphasis(text) => italic(text),
            Span::Code(text) => code(text),
            Span::Link { text, url } => link(text, url),
        })
        .collect()
}

/// Renders the placeholder shown when no page is selected.
pub fn render_welcome() -> String {
    format!(
        "{}\n{}\n",
        header("Welcome to LAPI"),
        dim("Select a module from the sidebar to start exploring the documentation.")
    )
}

/// Renders a full page: title, description, blocks and footer.
///
/// Code samples without a language tag are highlighted as `default_language`.
pub fn render_document(doc: &Document, hl: &Highlighter, default_language: &str) -> String {
    let mut out = String::new();
    out.push_str(&header(&doc.title));
    out.push('\n');
    if let Some(description) = &doc.description {
        out.push_str(&dim(description));
        out.push('\n');
    }
    out.push_str(&rule(RULE_WIDTH));
    out.push_str("\n\n");

    for block in &doc.blocks {
        out.push_str(&render_block(block, hl, default_language));
        out.push('\n');
    }

    out.push_str(&render_footer());
    out
}

/// Returns only the page's code samples, verbatim and separated by blank lines.
pub fn render_code_only(doc: &Document) -> String {
    let samples: Vec<&str> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::Code { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    let mut out = samples.join("\n\n");
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Renders a single block, ending with a newline.
fn render_block(block: &Block, hl: &Highlighter, default_language: &str) -> String {
    match block {
        Block::Paragraph { content } => format!("{}\n", render_rich(content)),
        Block::Code {
            content,
            language,
            title,
        } => {
            let language = language.as_deref().unwrap_or(default_language);
            let caption = title.as_deref().unwrap_or(language);
            format!(
                "{}\n{}",
                dim(&format!("┌ {caption}")),
                hl.highlight_numbered(content, language)
            )
        }
        Block::List { items } => items
            .iter()
            .map(|item| format!("  • {}\n", render_rich(item)))
            .collect(),
        Block::Heading { lines } => lines
            .iter()
            .map(|line| format!("{}\n", subheader(line)))
            .collect(),
        Block::Subheading { content } => format!(
            "{}{}{}{}\n",
            dim("│ "),
            colors::ITALIC,
            content.plain_text(),
            colors::RESET
        ),
        Block::Table {
            header: columns,
            rows,
        } => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(
                columns
                    .iter()
                    .map(|column| Cell::new(column).add_attribute(Attribute::Bold)),
            );
            for row in rows {
                table.add_row(row.iter().map(|cell| Cell::new(cell.plain_text())));
            }
            format!("{table}\n")
        }
    }
}

/// Renders the help and bug-report footer.
fn render_footer() -> String {
    format!(
        "{}\n{} Join Discord →\n{} Report Issue →\n",
        rule(RULE_WIDTH),
        dim("Need help?"),
        dim("Found a bug?"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_text_styles() {
        let out = render_rich(&RichText::parse("use `lui` and **bold**"));
        assert!(out.contains(&code("lui")));
        assert!(out.contains(&bold("bold")));
    }

    #[test]
    fn welcome_state() {
        let out = render_welcome();
        assert!(out.contains("Welcome to LAPI"));
        assert!(out.contains("Select a module from the sidebar"));
    }

    #[test]
    fn code_caption_falls_back_to_language() {
        let hl = Highlighter::new();
        let untitled = render_block(&Block::code("x = 1"), &hl, "lua");
        assert!(untitled.contains("┌ lua"));
        assert!(untitled.contains("1 │ "));

        let titled = Block::Code {
            content: "x = 1".into(),
            language: Some("lua".into()),
            title: Some("Example".into()),
        };
        assert!(render_block(&titled, &hl, "lua").contains("┌ Example"));
    }

    #[test]
    fn table_has_header_and_cells() {
        let hl = Highlighter::new();
        let block = Block::table(&["Method", "Returns"], &[&["`get()`", "value"]]);
        let out = render_block(&block, &hl, "lua");
        assert!(out.contains("Method"));
        assert!(out.contains("get()"));
        assert!(out.contains("value"));
    }

    #[test]
    fn document_has_title_blocks_and_footer() {
        let hl = Highlighter::new();
        let doc = Document::new("utils", "Utils")
            .with_description("Helpers")
            .with_block(Block::list(&["one", "two"]))
            .with_block(Block::subheading("a note"));
        let out = render_document(&doc, &hl, "lua");
        assert!(out.contains("Utils"));
        assert!(out.contains("Helpers"));
        assert!(out.contains("  • one"));
        assert!(out.contains("a note"));
        assert!(out.contains("Join Discord →"));
        assert!(out.contains("Report Issue →"));
    }

    #[test]
    fn code_only_output() {
        let doc = Document::new("x", "X")
            .with_block(Block::paragraph("prose"))
            .with_block(Block::code("a()"))
            .with_block(Block::code("b()\n"));
        assert_eq!(render_code_only(&doc), "a()\n\nb()\n");
        assert_eq!(render_code_only(&Document::new("y", "Y")), "");
    }
}
