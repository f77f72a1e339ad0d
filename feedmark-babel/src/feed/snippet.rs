//! Plain-text snippets
//!
//! Snippets are short previews used for searching and listing, so unlike the Markdown
//! conversion they go through a real HTML parser: every entity is decoded and scripts and
//! styles are skipped, whatever shape the markup is in.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Elements whose boundaries separate words.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p",
    "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Render an HTML fragment as a single line of text.
///
/// Tags are dropped, entities decoded, and whitespace runs collapsed to one space.
pub fn plain_text(html: &str) -> String {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let mut text = String::new();
    collect_text(&dom.document, &mut text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } => {
            let local: &str = &name.local;
            if matches!(local, "script" | "style" | "template") {
                return;
            }
            let block = BLOCK_ELEMENTS.contains(&local);
            if block {
                out.push(' ');
            }
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
            if block {
                out.push(' ');
            }
        }
        NodeData::Document => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}
