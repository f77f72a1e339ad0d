//! RSS and Atom reader
//!
//! Reads RSS 2.0 (`<rss><channel><item>`), RSS 1.0 (`<rdf:RDF><item>`) and Atom
//! (`<feed><entry>`) documents into [`FeedItem`]s. Elements are matched by local name, so
//! the usual namespace prefixes (`content:`, `dc:`) are accepted whatever they are bound to.

use super::snippet::plain_text;
use super::{FeedItem, UNTITLED};
use crate::error::FeedError;
use chrono::{DateTime, FixedOffset};
use roxmltree::{Document, Node, ParsingOptions};
use url::Url;

/// Parse a feed document and return at most `limit` items, in document order.
///
/// `source_url` is where the document came from. It is the link of entries that have none,
/// and relative entry links are resolved against it.
pub fn parse_feed(xml: &str, source_url: &str, limit: usize) -> Result<Vec<FeedItem>, FeedError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|e| FeedError::Xml(e.to_string()))?;

    let root = doc.root_element();
    let entries: Vec<Node> = match root.tag_name().name() {
        "rss" => children(root, "channel")
            .flat_map(|channel| children(channel, "item"))
            .collect(),
        "RDF" => children(root, "item").collect(),
        "feed" => children(root, "entry").collect(),
        other => return Err(FeedError::UnsupportedDocument(other.to_string())),
    };

    if entries.len() > limit {
        tracing::debug!(total = entries.len(), limit, "feed truncated");
    }

    let base = Url::parse(source_url).ok();
    let items = entries
        .into_iter()
        .take(limit)
        .map(|entry| match root.tag_name().name() {
            "feed" => read_atom_entry(&doc, entry, source_url, base.as_ref()),
            _ => read_rss_item(entry, source_url, base.as_ref()),
        })
        .collect();

    Ok(items)
}

fn read_rss_item(item: Node, source_url: &str, base: Option<&Url>) -> FeedItem {
    let content = child_text(item, "encoded").or_else(|| child_text(item, "description"));

    FeedItem {
        title: child_text(item, "title").unwrap_or_else(|| UNTITLED.to_string()),
        link: child_text(item, "link")
            .map(|link| resolve_link(&link, base))
            .unwrap_or_else(|| source_url.to_string()),
        author: child_text(item, "creator").or_else(|| child_text(item, "author")),
        published: child_text(item, "pubDate")
            .or_else(|| child_text(item, "date"))
            .and_then(|date| parse_date(&date)),
        content_snippet: snippet(content.as_deref(), None),
        content,
    }
}

fn read_atom_entry(doc: &Document, entry: Node, source_url: &str, base: Option<&Url>) -> FeedItem {
    let summary = child_text(entry, "summary");
    let content = children(entry, "content")
        .next()
        .and_then(|node| atom_content(doc, node))
        .or_else(|| summary.clone());

    FeedItem {
        title: child_text(entry, "title").unwrap_or_else(|| UNTITLED.to_string()),
        link: atom_link(entry)
            .map(|link| resolve_link(link, base))
            .unwrap_or_else(|| source_url.to_string()),
        author: children(entry, "author")
            .find_map(|author| child_text(author, "name"))
            .or_else(|| child_text(entry, "creator")),
        published: child_text(entry, "published")
            .or_else(|| child_text(entry, "updated"))
            .and_then(|date| parse_date(&date)),
        content_snippet: snippet(content.as_deref(), summary),
        content,
    }
}

/// `type="xhtml"` content is inline markup; everything else is (escaped) text.
fn atom_content(doc: &Document, node: Node) -> Option<String> {
    if node.attribute("type") != Some("xhtml") {
        return text_of(node);
    }

    let source = doc.input_text();
    let markup: String = node
        .children()
        .map(|child| &source[child.range()])
        .collect();
    let markup = markup.trim();
    (!markup.is_empty()).then(|| markup.to_string())
}

/// The `alternate` link, or the first link when none is marked.
fn atom_link<'a>(entry: Node<'a, '_>) -> Option<&'a str> {
    let links: Vec<Node> = children(entry, "link").collect();
    links
        .iter()
        .find(|link| matches!(link.attribute("rel"), None | Some("alternate")))
        .or_else(|| links.first())
        .and_then(|link| link.attribute("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
}

fn snippet(content: Option<&str>, summary: Option<String>) -> Option<String> {
    content
        .map(plain_text)
        .filter(|text| !text.is_empty())
        .or(summary)
}

/// Absolute links are kept as written; relative ones are joined onto the feed URL.
fn resolve_link(link: &str, base: Option<&Url>) -> String {
    if Url::parse(link).is_ok() {
        return link.to_string();
    }
    base.and_then(|base| base.join(link).ok())
        .map(String::from)
        .unwrap_or_else(|| link.to_string())
}

fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let parsed = DateTime::parse_from_rfc2822(text)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok();
    if parsed.is_none() {
        tracing::debug!(date = text, "ignoring unparsable date");
    }
    parsed
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn child_text(node: Node, name: &'static str) -> Option<String> {
    children(node, name).next().and_then(text_of)
}

/// Concatenated text of an element (CDATA included), trimmed; `None` when blank.
fn text_of(node: Node) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
