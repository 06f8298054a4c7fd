//! Inline rich text.
//!
//! Paragraphs, list items, subheadings and table cells carry inline styling. Corpus files
//! author them as inline Markdown (`**strong**`, `*emphasis*`, `` `code` ``, `[label](url)`).
//! They are parsed once at load time into a flat run of [`Span`]s, so search operates on
//! plain text and renderers never see markup.

use std::fmt;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::{Deserialize, Deserializer, Serialize};

/// A styled run of inline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "value", rename_all = "snake_case")]
pub enum Span {
    /// Unstyled text.
    Plain(String),
    /// Strong emphasis, rendered bold.
    Strong(String),
    /// Regular emphasis, rendered italic.
    Emphasis(String),
    /// Inline code.
    Code(String),
    /// A hyperlink.
    Link {
        /// Link label.
        text: String,
        /// Link target.
        url: String,
    },
}

impl Span {
    /// Returns the visible text of the span.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text)
            | Self::Strong(text)
            | Self::Emphasis(text)
            | Self::Code(text)
            | Self::Link { text, .. } => text,
        }
    }

    /// Returns a mutable handle on the visible text of the span.
    fn text_mut(&mut self) -> &mut String {
        match self {
            Self::Plain(text)
            | Self::Strong(text)
            | Self::Emphasis(text)
            | Self::Code(text)
            | Self::Link { text, .. } => text,
        }
    }

    /// Returns true if `other` has the same style and can be merged into this span.
    fn same_style(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Plain(_), Self::Plain(_))
            | (Self::Strong(_), Self::Strong(_))
            | (Self::Emphasis(_), Self::Emphasis(_))
            | (Self::Code(_), Self::Code(_)) => true,
            (Self::Link { url: a, .. }, Self::Link { url: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Inline text with styling, stored as an ordered sequence of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText {
    /// Styled spans in reading order.
    spans: Vec<Span>,
}

impl RichText {
    /// Parses inline Markdown into rich text.
    ///
    /// Block structure is flattened: consecutive paragraphs or list items are joined with a
    /// single space. Raw HTML is dropped.
    pub fn parse(source: &str) -> Self {
        let mut builder = SpanBuilder::default();

        for event in Parser::new(source) {
            match event {
                Event::Start(Tag::Strong) => builder.strong += 1,
                Event::End(TagEnd::Strong) => builder.strong = builder.strong.saturating_sub(1),
                Event::Start(Tag::Emphasis) => builder.emphasis += 1,
                Event::End(TagEnd::Emphasis) => {
                    builder.emphasis = builder.emphasis.saturating_sub(1);
                }
                Event::Start(Tag::Link { dest_url, .. }) => {
                    builder.link = Some(dest_url.into_string());
                }
                Event::End(TagEnd::Link) => builder.link = None,
                Event::Start(Tag::Paragraph | Tag::Item | Tag::Heading { .. }) => {
                    builder.separate();
                }
                Event::Text(text) => builder.text(&text),
                Event::Code(code) => builder.code(&code),
                Event::SoftBreak | Event::HardBreak => builder.text(" "),
                _ => {}
            }
        }

        Self {
            spans: builder.spans,
        }
    }

    /// Creates rich text from pre-built spans.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Returns the styled spans.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the text with all styling removed.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }

    /// Returns true if there is no visible text.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text().is_empty())
    }
}

impl From<&str> for RichText {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(span.text())?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Ok(Self::parse(&source))
    }
}

/// Accumulates spans while walking parser events.
#[derive(Default)]
struct SpanBuilder {
    /// Spans emitted so far.
    spans: Vec<Span>,
    /// Depth of open strong tags.
    strong: usize,
    /// Depth of open emphasis tags.
    emphasis: usize,
    /// Target of the enclosing link, if any.
    link: Option<String>,
}

impl SpanBuilder {
    /// Appends text in the currently active style.
    fn text(&mut self, text: &str) {
        let span = if let Some(url) = &self.link {
            Span::Link {
                text: text.to_string(),
                url: url.clone(),
            }
        } else if self.strong > 0 {
            Span::Strong(text.to_string())
        } else if self.emphasis > 0 {
            Span::Emphasis(text.to_string())
        } else {
            Span::Plain(text.to_string())
        };
        self.push(span);
    }

    /// Appends inline code. Code inside a link becomes part of the link label.
    fn code(&mut self, code: &str) {
        if self.link.is_some() {
            self.text(code);
        } else {
            self.push(Span::Code(code.to_string()));
        }
    }

    /// Inserts a single space between block-level elements.
    fn separate(&mut self) {
        let needs_space = self
            .spans
            .last()
            .is_some_and(|s| !s.text().ends_with(char::is_whitespace));
        if needs_space {
            self.push(Span::Plain(" ".to_string()));
        }
    }

    /// Pushes a span, merging it into the previous one when styles match.
    fn push(&mut self, span: Span) {
        if let Some(last) = self.spans.last_mut()
            && last.same_style(&span)
        {
            last.text_mut().push_str(span.text());
            return;
        }
        self.spans.push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_single_span() {
        let text = RichText::parse("Returns the element value.");
        assert_eq!(
            text.spans(),
            &[Span::Plain("Returns the element value.".into())]
        );
    }

    #[test]
    fn inline_code_is_split_out() {
        let text = RichText::parse("Place `lapi.lua` in your gamesense directory");
        assert_eq!(
            text.spans(),
            &[
                Span::Plain("Place ".into()),
                Span::Code("lapi.lua".into()),
                Span::Plain(" in your gamesense directory".into()),
            ]
        );
        assert_eq!(text.plain_text(), "Place lapi.lua in your gamesense directory");
    }

    #[test]
    fn strong_and_emphasis() {
        let text = RichText::parse("form the **Libre API** and *more*");
        assert_eq!(
            text.spans(),
            &[
                Span::Plain("form the ".into()),
                Span::Strong("Libre API".into()),
                Span::Plain(" and ".into()),
                Span::Emphasis("more".into()),
            ]
        );
    }

    #[test]
    fn links_keep_their_target() {
        let text = RichText::parse("All [supported events](https://example.com/events) here");
        assert_eq!(
            text.spans()[1],
            Span::Link {
                text: "supported events".into(),
                url: "https://example.com/events".into(),
            }
        );
        assert_eq!(text.plain_text(), "All supported events here");
    }

    #[test]
    fn intraword_underscores_are_literal() {
        let text = RichText::parse("find_first returns a handle, then call find_close.");
        assert_eq!(
            text.plain_text(),
            "find_first returns a handle, then call find_close."
        );
    }

    #[test]
    fn soft_breaks_become_spaces() {
        let text = RichText::parse("first line\nsecond line");
        assert_eq!(text.plain_text(), "first line second line");
    }

    #[test]
    fn separate_paragraphs_are_joined() {
        let text = RichText::parse("one\n\ntwo");
        assert_eq!(text.plain_text(), "one two");
    }

    #[test]
    fn empty_source() {
        let text = RichText::parse("");
        assert!(text.is_empty());
        assert_eq!(text.plain_text(), "");
    }

    #[test]
    fn deserializes_from_markdown_string() {
        let text: RichText = serde_json::from_str("\"use `lui`\"").unwrap();
        assert_eq!(text.plain_text(), "use lui");
        assert_eq!(text.to_string(), "use lui");
    }

    #[test]
    fn serializes_as_span_list() {
        let text = RichText::parse("`x` y");
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json[0]["style"], "code");
        assert_eq!(json[0]["value"], "x");
        assert_eq!(json[1]["style"], "plain");
    }
}
