//! Inline formatting: emphasis, underline, links and images

use super::escape::{encode_uri_lossy, escape_brackets, escape_html_attribute};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static STRONG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<strong\b[^>]*>(.*?)</strong>").expect("invalid regex"));
static B_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<b\b[^>]*>(.*?)</b>").expect("invalid regex"));
static EM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<em\b[^>]*>(.*?)</em>").expect("invalid regex"));
static I_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<i\b[^>]*>(.*?)</i>").expect("invalid regex"));
static U_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<u\b[^>]*>(.*?)</u>").expect("invalid regex"));
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).expect("invalid regex")
});
static IMG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("invalid regex"));
static ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s([a-zA-Z_:][a-zA-Z0-9_:.-]*)\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#)
        .expect("invalid regex")
});
static EMOJI_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/emoji/").expect("invalid regex"));

/// Height, in pixels, emoji images are pinned to so they sit on the text line.
pub const EMOJI_HEIGHT: u32 = 18;

/// Inline style of rendered emoji images; it keeps them at [`EMOJI_HEIGHT`].
const EMOJI_STYLE: &str = "height:18px;width:auto;vertical-align:text-bottom;";

/// Wrap `content` in an emphasis `marker`.
///
/// Surrounding whitespace stays outside the markers, and trailing hyphens or dashes
/// (U+2010..=U+2015) are moved after the closing marker: `hello-` becomes `**hello**-`.
/// Content that is empty once trimmed is returned unchanged.
pub fn wrap_inline(content: &str, marker: &str) -> String {
    let trimmed_start = content.trim_start();
    let leading = &content[..content.len() - trimmed_start.len()];
    let body = trimmed_start.trim_end();
    let trailing = &trimmed_start[body.len()..];

    if body.is_empty() {
        return content.to_string();
    }

    let mut body = body;
    let mut dashes = String::new();
    while let Some(last) = body.chars().next_back().filter(|c| is_dash(*c)) {
        dashes.insert(0, last);
        body = body[..body.len() - last.len_utf8()].trim_end();
    }

    if body.is_empty() {
        return content.to_string();
    }

    format!("{leading}{marker}{body}{marker}{dashes}{trailing}")
}

fn is_dash(c: char) -> bool {
    c == '-' || ('\u{2010}'..='\u{2015}').contains(&c)
}

/// Run the inline passes in order: bold, italic, underline, links, images.
pub fn convert_inline(html: &str) -> String {
    let wrap = |marker: &'static str| move |caps: &Captures| wrap_inline(&caps[1], marker);

    let text = STRONG_PATTERN.replace_all(html, wrap("**"));
    let text = B_PATTERN.replace_all(&text, wrap("**"));
    let text = EM_PATTERN.replace_all(&text, wrap("*"));
    let text = I_PATTERN.replace_all(&text, wrap("*"));
    let text = U_PATTERN.replace_all(&text, |caps: &Captures| caps[1].to_string());
    let text = LINK_PATTERN.replace_all(&text, |caps: &Captures| {
        format!("[{}]({})", &caps[2], &caps[1])
    });
    IMG_PATTERN
        .replace_all(&text, |caps: &Captures| render_image(&caps[0]))
        .into_owned()
}

/// Render one `<img>` tag.
///
/// Sources under an `/emoji/` path stay inline HTML with a fixed height so they line up with
/// the text. Everything else becomes a Markdown image. Tags without a `src` vanish.
///
/// Emoji tags this function already produced (inside a converted quote) are kept as they are.
pub fn render_image(tag: &str) -> String {
    let Some(src) = attribute(tag, "src").filter(|src| !src.is_empty()) else {
        return String::new();
    };
    if EMOJI_PATH.is_match(&src) && attribute(tag, "style").as_deref() == Some(EMOJI_STYLE) {
        return tag.to_string();
    }
    let encoded = encode_uri_lossy(&src);
    let alt = attribute(tag, "alt").unwrap_or_default();

    if EMOJI_PATH.is_match(&src) {
        let label = Some(alt)
            .filter(|alt| !alt.is_empty())
            .or_else(|| attribute(tag, "title").filter(|v| !v.is_empty()))
            .or_else(|| attribute(tag, "data-emoji-name").filter(|v| !v.is_empty()))
            .or_else(|| attribute(tag, "data-emoji-shortname"))
            .unwrap_or_default();
        return format!(
            r#"<img src="{encoded}" alt="{}" height="{EMOJI_HEIGHT}" style="{EMOJI_STYLE}" />"#,
            escape_html_attribute(&label)
        );
    }

    format!("![{}]({encoded})", escape_brackets(&alt))
}

/// Read a quoted attribute value from a start tag, trimmed.
///
/// Only single-line values in single or double quotes are recognised; the attribute name
/// must be preceded by whitespace so `data-src` is not mistaken for `src`.
pub(crate) fn attribute(tag: &str, name: &str) -> Option<String> {
    ATTRIBUTE_PATTERN
        .captures_iter(tag)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|value| value.as_str().trim().to_string())
}
