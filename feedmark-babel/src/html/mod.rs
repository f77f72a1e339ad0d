//! HTML to Markdown conversion
//!
//!     Feed bodies are fragments of forum and news HTML: a handful of formatting tags, quoted
//!     posts, emoji images, and whatever else the publishing software emitted. The converter
//!     does not build a DOM. It runs a fixed sequence of rewriting passes over the whole string,
//!     each pass reading the output of the one before:
//!
//!         1. entity decoding                  (entities.rs)
//!         2. quoted-post extraction           (quote.rs, recursive)
//!         3. line breaks and containers       (blocks.rs)
//!         4. headings                         (blocks.rs)
//!         5. bold, italic, underline, links, images   (inline.rs)
//!         6. lists                            (blocks.rs)
//!         7. blockquotes                      (blocks.rs)
//!         8. code                             (blocks.rs)
//!         9. tag stripping, emoji images kept (blocks.rs)
//!        10. whitespace cleanup
//!
//!     The order matters. Quotes are pulled out before anything else touches their markup,
//!     headings are taken before inline formatting so their text stays verbatim, and tags are
//!     stripped only once every pass that needs them has run.
//!
//!     Conversion never fails. Malformed or unbalanced markup degrades to its text content.
//!
//! Escaping
//!
//!     Body text is passed through unescaped: feed authors' own `*` and `_` characters are
//!     assumed to be intentional. Only inserted text (usernames, alt text) is escaped.

mod blocks;
mod entities;
mod escape;
mod inline;
mod quote;
mod scan;

pub use entities::decode_entities;
pub use escape::{encode_uri, escape_markdown};
pub use inline::{wrap_inline, EMOJI_HEIGHT};
pub use quote::QuoteBlock;

use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid regex"));

/// Quotes nested deeper than this are flattened to text.
pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 16;

/// Tuning for a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// How many quoted posts may nest inside each other before the inner ones are left to the
    /// generic blockquote pass.
    pub max_quote_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_quote_depth: DEFAULT_MAX_QUOTE_DEPTH,
        }
    }
}

/// Convert an HTML fragment to Markdown with the default options.
///
/// ```ignore
/// assert_eq!(html_to_markdown("<p><b>Hi</b> there</p>"), "**Hi** there");
/// ```
pub fn html_to_markdown(html: &str) -> String {
    html_to_markdown_with_options(html, &ConvertOptions::default())
}

/// Convert an HTML fragment to Markdown.
pub fn html_to_markdown_with_options(html: &str, options: &ConvertOptions) -> String {
    convert(html, options, 0)
}

/// Run the pass pipeline. `depth` counts the quoted posts enclosing `html`.
pub(crate) fn convert(html: &str, options: &ConvertOptions, depth: usize) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = entities::decode_entities(html);
    let text = quote::extract_quotes(&text, options, depth);
    let text = blocks::convert_breaks_and_containers(&text);
    let text = blocks::convert_headings(&text);
    let text = inline::convert_inline(&text);
    let text = blocks::convert_lists(&text);
    let text = blocks::convert_blockquotes(&text);
    let text = blocks::convert_code(&text);
    let text = blocks::strip_tags(&text);

    clean_whitespace(&text)
}

/// Non-breaking spaces become spaces, blank-line runs collapse to one, ends are trimmed.
fn clean_whitespace(text: &str) -> String {
    let text = text.replace('\u{a0}', " ");
    BLANK_LINES.replace_all(&text, "\n\n").trim().to_string()
}
