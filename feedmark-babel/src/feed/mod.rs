//! Feed items
//!
//! A [`FeedItem`] is the read-only record the reader produces for every entry of a feed
//! document. The conversion engine only ever looks at its HTML body; everything else is there
//! for listing.

mod parser;
mod snippet;

pub use parser::parse_feed;
pub use snippet::plain_text;

use crate::html::{html_to_markdown_with_options, ConvertOptions};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// How many items [`parse_feed`] returns unless told otherwise.
pub const DEFAULT_LIMIT: usize = 20;

/// Title given to entries that have none.
pub const UNTITLED: &str = "Untitled";

/// One entry of a feed.
///
/// `title` and `link` are always present: the reader falls back to [`UNTITLED`] and to the
/// feed's own URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            author: None,
            published: None,
            content_snippet: None,
            content: None,
        }
    }

    /// The HTML to render: the full content, else the snippet.
    pub fn body_html(&self) -> Option<&str> {
        non_empty(&self.content).or_else(|| non_empty(&self.content_snippet))
    }

    /// The detail document: `# title`, a blank line, then the converted body.
    pub fn to_markdown(&self, options: &ConvertOptions) -> String {
        let mut parts = vec![format!("# {}", self.title)];
        if let Some(body) = self.body_html() {
            parts.push(html_to_markdown_with_options(body, options));
        }
        parts.join("\n\n")
    }

    /// Extra terms a list filter should match besides the title.
    pub fn keywords(&self) -> Vec<&str> {
        [&self.author, &self.content_snippet, &self.content]
            .into_iter()
            .filter_map(non_empty)
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
