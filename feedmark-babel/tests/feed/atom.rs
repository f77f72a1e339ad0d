use crate::common::read_fixture;
use feedmark_babel::{parse_feed, ConvertOptions, DEFAULT_LIMIT};

const SOURCE: &str = "https://forum.test/latest.atom";

#[test]
fn test_reads_atom_entries() {
    let items = parse_feed(&read_fixture("forum.atom"), SOURCE, DEFAULT_LIMIT).unwrap();
    assert_eq!(items.len(), 2);

    let reply = &items[0];
    assert_eq!(reply.title, "Re: Zelda");
    assert_eq!(reply.link, "https://forum.test/t/1");
    assert_eq!(reply.author.as_deref(), Some("Link"));
    assert_eq!(
        reply.published.map(|date| date.to_rfc3339()),
        Some("2026-10-18T09:30:00+00:00".to_string())
    );
    assert_eq!(reply.content_snippet.as_deref(), Some("Hey Listen"));
    assert_eq!(
        reply.keywords(),
        vec![
            "Link",
            "Hey Listen",
            r#"<aside class="quote" data-user="zelda"><blockquote>Hey</blockquote></aside><p>Listen</p>"#,
        ]
    );
}

#[test]
fn test_quoted_reply_detail() {
    let items = parse_feed(&read_fixture("forum.atom"), SOURCE, DEFAULT_LIMIT).unwrap();

    assert_eq!(
        items[0].to_markdown(&ConvertOptions::default()),
        "# Re: Zelda\n\n**zelda**\n> Hey\n\nListen"
    );
}

#[test]
fn test_xhtml_content_keeps_markup() {
    let items = parse_feed(&read_fixture("forum.atom"), SOURCE, DEFAULT_LIMIT).unwrap();

    let entry = &items[1];
    assert_eq!(entry.link, SOURCE);
    assert_eq!(entry.content_snippet.as_deref(), Some("Hi there"));
    assert_eq!(
        entry.to_markdown(&ConvertOptions::default()),
        "# XHTML\n\nHi *there*"
    );
}
