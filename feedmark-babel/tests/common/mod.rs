//! Shared helpers: parse produced Markdown back with comrak and look at its structure.

#![allow(dead_code)]

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use std::path::PathBuf;

/// Parse Markdown into a comrak tree allocated in `arena`.
pub fn parse_markdown<'a>(arena: &'a Arena<AstNode<'a>>, md: &str) -> &'a AstNode<'a> {
    parse_document(arena, md, &ComrakOptions::default())
}

/// Name of a node kind, for structure assertions.
pub fn kind(node: &AstNode<'_>) -> &'static str {
    match &node.data.borrow().value {
        NodeValue::Document => "Document",
        NodeValue::Paragraph => "Paragraph",
        NodeValue::Heading(_) => "Heading",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::BlockQuote => "BlockQuote",
        NodeValue::CodeBlock(_) => "CodeBlock",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::Image(_) => "Image",
        NodeValue::HtmlInline(_) => "HtmlInline",
        NodeValue::Text(_) => "Text",
        NodeValue::SoftBreak => "SoftBreak",
        _ => "Other",
    }
}

/// Kinds of the direct children of `node`.
pub fn child_kinds<'a>(node: &'a AstNode<'a>) -> Vec<&'static str> {
    node.children().map(kind).collect()
}

/// Every node kind in the tree, depth first.
pub fn all_kinds<'a>(node: &'a AstNode<'a>) -> Vec<&'static str> {
    node.descendants().map(kind).collect()
}

/// Concatenated text of a node.
pub fn text_of<'a>(node: &'a AstNode<'a>) -> String {
    node.descendants()
        .filter_map(|n| match &n.data.borrow().value {
            NodeValue::Text(text) => Some(text.to_string()),
            _ => None,
        })
        .collect()
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should be readable")
}
