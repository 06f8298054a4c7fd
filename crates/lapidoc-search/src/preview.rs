//! Preview text shaping.

/// Appended to previews that were cut short.
pub const ELLIPSIS: &str = "...";

/// Shown when a result has neither a matched snippet nor a description.
pub const NO_PREVIEW: &str = "No preview available.";

/// Truncates `text` to at most `max_chars` characters, appending [`ELLIPSIS`] only when
/// something was removed.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len());
            out.push_str(&text[..cut]);
            out.push_str(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}
