//! Text-level fixups for the MyDVD loader.
//!
//! MyDVD rejects `<tag/>` and a trailing blank line. Both are conventions
//! of the serialized text, so they are patched on the rendered string after
//! the tree has been written out.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

fn empty_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<([A-Za-z_][A-Za-z0-9_.:\-]*)\s*/>").expect("valid empty tag pattern")
    })
}

/// Rewrite every attribute-less `<tag/>` as `<tag></tag>`.
pub fn expand_empty_tags(text: &str) -> Cow<'_, str> {
    empty_tag_pattern().replace_all(text, "<$1></$1>")
}

/// Drop one trailing newline (`\n` or `\r\n`), if present.
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Apply all fixups to rendered document text.
pub fn patch_serialized(text: &str) -> String {
    let expanded = expand_empty_tags(text);
    strip_trailing_newline(&expanded).to_string()
}
