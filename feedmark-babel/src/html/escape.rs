//! Escaping helpers
//!
//! Body text is never escaped wholesale. These helpers only protect text that the passes
//! insert into Markdown-significant positions (usernames, image alt text) and the URLs and
//! attributes they emit.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;

/// Characters percent-encoded in URLs, mirroring `encodeURI`: everything outside the URI
/// reserved and unreserved sets. `%` is handled separately so existing escapes survive.
const URI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

const MARKDOWN_SPECIALS: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '.', '!', '|', '-',
];

/// Backslash-escape every Markdown control character in `text`.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_SPECIALS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape `[` and `]` so text can sit inside `![...]` without closing it.
pub fn escape_brackets(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_html_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Percent-encode a URL for embedding in Markdown or HTML.
///
/// Valid `%XX` escapes are kept as they are, so already encoded URLs are not encoded twice.
/// Returns `None` when the URL holds a `%` that does not start a valid escape.
pub fn encode_uri(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..pos], URI_ENCODE_SET));
        let escape = rest.get(pos..pos + 3)?;
        if !escape[1..].bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        out.push_str(escape);
        rest = &rest[pos + 3..];
    }

    out.extend(utf8_percent_encode(rest, URI_ENCODE_SET));
    Some(out)
}

/// [`encode_uri`], falling back to the raw value when it cannot be encoded.
pub fn encode_uri_lossy(raw: &str) -> Cow<'_, str> {
    match encode_uri(raw) {
        Some(encoded) => Cow::Owned(encoded),
        None => Cow::Borrowed(raw),
    }
}
