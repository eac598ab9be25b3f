//! HTML detection and visible-text extraction
//!
//! Rich-text fields may carry HTML. Decoding strips the markup down to the
//! visible text; encoding of step definitions probes content to pick the
//! `"text"` or `"html"` format tag.

use once_cell::sync::Lazy;
use regex::Regex;

static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*<\s*[a-zA-Z!/]").expect("opening-tag pattern"));

static BLOCK_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("block pattern")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Whether the content starts like an HTML document or element
pub fn is_html(input: &str) -> bool {
    OPENING_TAG.is_match(input)
}

/// Extract the visible text of a possibly-HTML string
///
/// Markup-free input comes back trimmed and otherwise untouched. For markup,
/// script/style bodies are dropped, tags removed, the common entities
/// unescaped and whitespace collapsed.
pub fn extract_text(input: &str) -> String {
    if !input.contains('<') {
        return input.trim().to_string();
    }
    let without_blocks = BLOCK_CONTENT.replace_all(input, " ");
    let without_tags = TAG.replace_all(&without_blocks, " ");
    let unescaped = unescape_entities(&without_tags);
    WHITESPACE.replace_all(unescaped.trim(), " ").into_owned()
}

fn unescape_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
