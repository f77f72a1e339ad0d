//! Block structure: paragraphs, headings, lists, blockquotes and code
//!
//! Every block the passes emit is fenced by blank lines. Runs of blank lines this produces
//! are collapsed once at the end of the pipeline, never here.

use super::scan::{first_element, replace_elements, rewrite_innermost};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static BR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("invalid regex"));
static CONTAINER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|div|section|article|header|footer|figure)\b[^>]*>")
        .expect("invalid regex")
});
static HEADING_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6]\b[^>]*>").expect("invalid regex"));
static LI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li>").expect("invalid regex"));
static PRE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre>").expect("invalid regex"));
static CODE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<code\b[^>]*>").expect("invalid regex"));
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<code\b[^>]*>(.*?)</code>").expect("invalid regex"));

/// `<br>` becomes a newline; generic containers become paragraph breaks.
///
/// Containers are treated as paragraph boundaries whatever their nesting, which
/// over-approximates but never glues two blocks together.
pub fn convert_breaks_and_containers(html: &str) -> String {
    let text = BR_PATTERN.replace_all(html, "\n");
    CONTAINER_PATTERN.replace_all(&text, "\n\n").into_owned()
}

/// `<hN>` becomes an ATX heading of level N on its own paragraph.
///
/// The heading text is taken verbatim (trimmed). A start tag without a matching end tag of
/// the same level is left alone.
pub fn convert_headings(html: &str) -> String {
    replace_elements(html, &HEADING_OPEN, |heading| {
        let level = heading
            .open_tag
            .as_bytes()
            .get(2)
            .map_or(1, |digit| usize::from(digit - b'0'));
        format!("\n\n{} {}\n\n", "#".repeat(level), heading.inner.trim())
    })
}

/// Convert `<ul>` and `<ol>` lists, then any `<li>` left outside a list.
///
/// Nested lists are converted first; their lines are indented under the parent item.
pub fn convert_lists(html: &str) -> String {
    let text = rewrite_innermost(html, &["ul", "ol"], |name, _, body| {
        render_list(body, name.eq_ignore_ascii_case("ol"))
    });
    LI_PATTERN
        .replace_all(&text, |caps: &Captures| format!("- {}\n", caps[1].trim()))
        .into_owned()
}

fn render_list(body: &str, ordered: bool) -> String {
    let mut lines = String::new();
    let mut cursor = 0;
    let mut number = 1;

    for caps in LI_PATTERN.captures_iter(body) {
        let Some(item) = caps.get(0) else {
            continue;
        };
        push_stray_text(&mut lines, &body[cursor..item.start()]);

        let marker = if ordered {
            format!("{number}. ")
        } else {
            "- ".to_string()
        };
        number += 1;

        let indent = " ".repeat(marker.len());
        let mut item_lines = caps[1].trim().lines().filter(|line| !line.trim().is_empty());
        lines.push_str(&marker);
        lines.push_str(item_lines.next().unwrap_or_default());
        lines.push('\n');
        for line in item_lines {
            lines.push_str(&indent);
            lines.push_str(line);
            lines.push('\n');
        }

        cursor = item.end();
    }
    push_stray_text(&mut lines, &body[cursor..]);

    format!("\n\n{}\n\n", lines.trim_end())
}

/// Text between items survives on its own line; whitespace-only gaps are dropped so
/// pretty-printed HTML still yields a tight list.
fn push_stray_text(lines: &mut String, gap: &str) {
    let gap = gap.trim();
    if !gap.is_empty() {
        lines.push_str(gap);
        lines.push('\n');
    }
}

/// Prefix every non-empty line of a `<blockquote>` with `> `.
///
/// Blank lines inside the quote are dropped, and a quote with no text disappears. Nested
/// blockquotes are converted first so they nest as `> > `.
pub fn convert_blockquotes(html: &str) -> String {
    rewrite_innermost(html, &["blockquote"], |_, _, body| {
        let lines: Vec<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| format!("> {line}"))
            .collect();
        if lines.is_empty() {
            String::new()
        } else {
            format!("\n\n{}\n\n", lines.join("\n"))
        }
    })
}

/// `<pre>` becomes a fenced block and `<code>` an inline span, content untouched.
///
/// A `<code>` element wrapping the whole `<pre>` body is unwrapped into the fence.
pub fn convert_code(html: &str) -> String {
    let text = PRE_PATTERN.replace_all(html, |caps: &Captures| {
        let body = &caps[1];
        let body = first_element(body, &CODE_OPEN)
            .filter(|code| {
                body[..code.range.start].trim().is_empty() && body[code.range.end..].trim().is_empty()
            })
            .map_or(body, |code| code.inner);
        format!("\n\n```\n{}\n```\n\n", body.trim_matches(['\r', '\n']))
    });
    CODE_PATTERN
        .replace_all(&text, |caps: &Captures| format!("`{}`", &caps[1]))
        .into_owned()
}

/// Remove every remaining tag except `<img>`, keeping the text between tags.
///
/// A `<` with no closing `>` after it is kept as text.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tag = &rest[open..];

        if is_img_tag(tag) {
            out.push('<');
            rest = &tag[1..];
            continue;
        }

        match tag.find('>') {
            Some(close) => rest = &tag[close + 1..],
            None => {
                out.push_str(tag);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_img_tag(tag: &str) -> bool {
    let Some(name) = tag.get(1..4) else {
        return false;
    };
    name.eq_ignore_ascii_case("img")
        && !tag[4..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
}
