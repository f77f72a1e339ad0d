//! Behaviour every conversion must keep, whatever the input.

use feedmark_babel::html_to_markdown;
use proptest::prelude::*;

#[test]
fn test_trailing_dash_moves_outside_emphasis() {
    assert_eq!(html_to_markdown("<b>hello-</b>world"), "**hello**-world");
    assert_eq!(html_to_markdown("<em>wait \u{2013}</em> what"), "*wait*\u{2013} what");
}

#[test]
fn test_empty_inline_content_is_inert() {
    assert_eq!(html_to_markdown("<i></i>"), "");
    assert_eq!(html_to_markdown("a<i></i>b"), "ab");
    assert_eq!(html_to_markdown("a<b> </b>b"), "a b");
}

#[test]
fn test_lists() {
    assert_eq!(html_to_markdown("<ul><li>A</li><li>B</li></ul>"), "- A\n- B");
    assert_eq!(html_to_markdown("<ol><li>A</li><li>B</li></ol>"), "1. A\n2. B");
    assert_eq!(
        html_to_markdown("<p>Intro</p><ul><li>A</li></ul><p>Outro</p>"),
        "Intro\n\n- A\n\nOutro"
    );
}

#[test]
fn test_images() {
    let emoji = html_to_markdown(r#"<img src="https://x/emoji/smile.png" alt="smile">"#);
    assert!(emoji.starts_with("<img "));
    assert!(emoji.contains(r#"height="18""#));
    assert!(emoji.contains(r#"alt="smile""#));

    assert_eq!(
        html_to_markdown(r#"<img src="https://x/photo.png" alt="a[b]">"#),
        r"![a\[b\]](https://x/photo.png)"
    );
}

#[test]
fn test_image_without_src_contributes_nothing() {
    assert_eq!(html_to_markdown(r#"<img alt="x">"#), "");
    assert_eq!(html_to_markdown(r#"before <img alt="x"> after"#), "before  after");
}

#[test]
fn test_blank_lines_collapse_and_ends_are_trimmed() {
    assert_eq!(html_to_markdown("\n\n<p>a</p>\n\n\n\n<p>b</p>\n\n"), "a\n\nb");
    assert_eq!(html_to_markdown("a<br><br><br><br>b"), "a\n\nb");
}

#[test]
fn test_username_stars_are_escaped_once() {
    let md = html_to_markdown(
        r#"<aside class="quote" data-user="*star*"><blockquote>hi</blockquote></aside>"#,
    );
    let header = md.lines().next().expect("header line");
    assert_eq!(header, r"**\*star\***");
}

#[test]
fn test_entities() {
    assert_eq!(html_to_markdown("Fish &amp; Chips&nbsp;&#39;24"), "Fish & Chips '24");
    assert_eq!(html_to_markdown("&mdash; stays"), "&mdash; stays");
}

#[test]
fn test_malformed_markup_degrades_to_text() {
    assert_eq!(html_to_markdown("<p>unclosed <b>bold"), "unclosed bold");
    assert_eq!(html_to_markdown("<div>a < b</div>"), "a < b");
    assert_eq!(html_to_markdown("</ul>stray</li>"), "stray");
}

#[test]
fn test_unknown_tags_keep_their_text() {
    assert_eq!(
        html_to_markdown(r#"<span style="color:red">red</span> <u>under</u> <font>old</font>"#),
        "red under old"
    );
}

proptest! {
    #[test]
    fn plain_text_is_unchanged(text in "[a-zA-Z0-9 .,!?*_#-]{0,80}") {
        prop_assert_eq!(html_to_markdown(&text), text.trim());
    }

    #[test]
    fn never_leaves_three_newlines(html in "(<p>|</p>|<br>|<div>|</div>|<li>|</li>|<ul>|</ul>|[a-z]{1,3}|\n){0,30}") {
        let md = html_to_markdown(&html);
        prop_assert!(!md.contains("\n\n\n"));
        prop_assert_eq!(md.trim(), md.as_str());
    }
}
