//! The produced Markdown must mean what the HTML meant: parse it back with comrak and check
//! the block structure.

use crate::common::{all_kinds, child_kinds, parse_markdown, text_of};
use comrak::nodes::{ListType, NodeValue};
use comrak::Arena;
use feedmark_babel::html_to_markdown;

#[test]
fn test_paragraphs_headings_and_lists_are_separate_blocks() {
    let md = html_to_markdown(
        "<h3>Title</h3><p>Intro <b>bold</b></p><ol><li>a</li><li>b</li></ol><p>End</p>",
    );
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    assert_eq!(child_kinds(root), vec!["Heading", "Paragraph", "List", "Paragraph"]);

    let heading = root.first_child().expect("heading");
    match &heading.data.borrow().value {
        NodeValue::Heading(heading) => assert_eq!(heading.level, 3),
        other => panic!("expected heading, got {other:?}"),
    }

    let list = root.children().nth(2).expect("list");
    match &list.data.borrow().value {
        NodeValue::List(list) => {
            assert_eq!(list.list_type, ListType::Ordered);
            assert_eq!(list.start, 1);
        }
        other => panic!("expected list, got {other:?}"),
    }
    assert_eq!(child_kinds(list), vec!["Item", "Item"]);
}

#[test]
fn test_emphasis_with_trailing_dash_parses_as_strong() {
    let md = html_to_markdown("<p><b>Pre-</b>order now</p>");
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    let kinds = all_kinds(root);
    assert!(kinds.contains(&"Strong"), "no strong node in {md:?}: {kinds:?}");
    assert_eq!(text_of(root), "Pre-order now");
}

#[test]
fn test_nested_quote_parses_as_nested_blockquotes() {
    let md = html_to_markdown(concat!(
        r#"<aside class="quote" data-user="alice"><blockquote>"#,
        r#"<aside class="quote" data-user="bob"><blockquote>inner</blockquote></aside>"#,
        r#"<p>outer</p></blockquote></aside>"#,
    ));
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    let quote = root
        .children()
        .find(|node| matches!(node.data.borrow().value, NodeValue::BlockQuote))
        .expect("outer blockquote");
    let nested = quote
        .children()
        .any(|node| matches!(node.data.borrow().value, NodeValue::BlockQuote));
    assert!(nested, "expected a nested blockquote in {md:?}");
}

#[test]
fn test_nested_list_is_a_sublist() {
    let md = html_to_markdown("<ul><li>Parent<ul><li>Child</li></ul></li><li>Sibling</li></ul>");
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    assert_eq!(child_kinds(root), vec!["List"]);
    let first_item = root
        .first_child()
        .and_then(|list| list.first_child())
        .expect("first item");
    assert_eq!(child_kinds(first_item), vec!["Paragraph", "List"]);
}

#[test]
fn test_images_and_links() {
    let md = html_to_markdown(
        r#"<p><a href="https://news.test/a">Read</a> <img src="https://news.test/p.png" alt="Photo"></p>"#,
    );
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    let kinds = all_kinds(root);
    assert!(kinds.contains(&"Link"));
    assert!(kinds.contains(&"Image"));
}

#[test]
fn test_emoji_stays_inline_html() {
    let md = html_to_markdown(r#"<p>Nice <img src="https://forum.test/emoji/ok.png" alt="ok"></p>"#);
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    assert!(all_kinds(root).contains(&"HtmlInline"));
}
