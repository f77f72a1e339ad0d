//! Quoted forum posts
//!
//! Forum software renders a quoted reply as
//!
//! ```text
//! <aside class="quote" data-user="alice">
//!   <div class="title"><img class="avatar" src="..."> alice:</div>
//!   <blockquote> ...quoted post... </blockquote>
//! </aside>
//! ```
//!
//! The container is replaced by an avatar/username header followed by the quoted post as a
//! Markdown blockquote. The quoted post goes through the whole pipeline again, which is how
//! quotes of quotes end up nested.

use super::escape::{encode_uri_lossy, escape_markdown};
use super::inline::attribute;
use super::scan::{elements, first_element, replace_elements};
use super::ConvertOptions;
use regex::Regex;
use std::sync::LazyLock;

static QUOTE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<aside\b[^>]*class="[^"]*quote[^"]*"[^>]*>"#).expect("invalid regex")
});
static TITLE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div\b[^>]*class="[^"]*title[^"]*"[^>]*>"#).expect("invalid regex")
});
static BLOCKQUOTE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<blockquote\b[^>]*>").expect("invalid regex"));
static BLOCKQUOTE_AHEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*<blockquote\b").expect("invalid regex"));
static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("invalid regex"));
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid regex"));
static TRAILING_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:：]\s*$").expect("invalid regex"));
static DATA_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)data-user="([^"]+)""#).expect("invalid regex"));

/// A quoted post pulled out of its container. Lives only until it is rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteBlock {
    pub avatar_url: Option<String>,
    pub username: Option<String>,
    /// The quoted post, already converted to Markdown
    pub body: String,
}

/// Replace every quote container in `html` by its Markdown rendering.
///
/// `depth` is the number of quotes already entered. At `options.max_quote_depth` the
/// containers are left in place for the later passes, which keep their text.
pub fn extract_quotes(html: &str, options: &ConvertOptions, depth: usize) -> String {
    if depth >= options.max_quote_depth {
        if QUOTE_OPEN.is_match(html) {
            tracing::debug!(depth, "quote nesting limit reached, keeping inner quotes as text");
        }
        return html.to_string();
    }

    replace_elements(html, &QUOTE_OPEN, |container| {
        QuoteBlock::parse(container.open_tag, container.inner, options, depth).to_markdown()
    })
}

impl QuoteBlock {
    /// Extract header and body from a quote container's start tag and content.
    ///
    /// Avatar: first image in the title, else an image whose class mentions `avatar`.
    /// Username: title text, else a `data-user` attribute, on the container itself first.
    pub fn parse(open_tag: &str, content: &str, options: &ConvertOptions, depth: usize) -> Self {
        let title = find_title(content);

        let mut avatar_url = title.and_then(first_image_src);
        let mut username = title.map(title_text).filter(|name| !name.is_empty());

        if avatar_url.is_none() {
            avatar_url = IMG_TAG
                .find_iter(content)
                .map(|img| img.as_str())
                .filter(|img| {
                    attribute(img, "class").is_some_and(|class| class.to_lowercase().contains("avatar"))
                })
                .find_map(|img| attribute(img, "src").filter(|src| !src.is_empty()));
        }

        if username.is_none() {
            username = DATA_USER
                .captures(open_tag)
                .or_else(|| DATA_USER.captures(content))
                .map(|caps| caps[1].trim().to_string())
                .filter(|name| !name.is_empty());
        }

        let body = first_element(content, &BLOCKQUOTE_OPEN)
            .map(|quote| super::convert(quote.inner, options, depth + 1))
            .unwrap_or_default();

        Self {
            avatar_url,
            username,
            body,
        }
    }

    /// Header lines, then the body as `> ` lines, fenced by blank lines.
    ///
    /// Consecutive blank lines in the body collapse into a single `> ` line. A block with
    /// neither header nor body renders as a bare paragraph break.
    pub fn to_markdown(&self) -> String {
        let mut header = Vec::new();
        if let Some(url) = &self.avatar_url {
            let alt = escape_markdown(self.username.as_deref().unwrap_or("Avatar"));
            header.push(format!("![{alt}]({})", encode_uri_lossy(url)));
        }
        if let Some(name) = &self.username {
            header.push(format!("**{}**", escape_markdown(name)));
        }

        let mut sections = Vec::new();
        if !header.is_empty() {
            sections.push(header.join("\n"));
        }
        let quoted = quote_lines(&self.body);
        if !quoted.is_empty() {
            sections.push(quoted.join("\n"));
        }

        if sections.is_empty() {
            "\n\n".to_string()
        } else {
            format!("\n\n{}\n\n", sections.join("\n"))
        }
    }
}

fn quote_lines(body: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut previous_blank = false;

    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            if !previous_blank {
                lines.push("> ".to_string());
                previous_blank = true;
            }
            continue;
        }
        lines.push(format!("> {line}"));
        previous_blank = false;
    }

    lines
}

/// The title element is the `class="...title..."` div right before the first `<blockquote>`.
/// Titles of quotes nested inside that blockquote belong to those quotes.
fn find_title(content: &str) -> Option<&str> {
    let head = BLOCKQUOTE_OPEN
        .find(content)
        .map_or(content, |quote| &content[..quote.start()]);
    elements(head, &TITLE_OPEN)
        .find(|title| BLOCKQUOTE_AHEAD.is_match(&content[title.range.end..]))
        .map(|title| title.inner)
}

fn first_image_src(title: &str) -> Option<String> {
    IMG_TAG
        .find_iter(title)
        .find_map(|img| attribute(img.as_str(), "src"))
        .filter(|src| !src.is_empty())
}

fn title_text(title: &str) -> String {
    let text = IMG_TAG.replace_all(title, "");
    let text = ANY_TAG.replace_all(&text, "");
    TRAILING_COLON.replace(&text, "").trim().to_string()
}
