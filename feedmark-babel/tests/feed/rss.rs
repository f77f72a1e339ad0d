use crate::common::read_fixture;
use chrono::{DateTime, Datelike};
use feedmark_babel::{parse_feed, ConvertOptions, FeedError, DEFAULT_LIMIT};

const SOURCE: &str = "https://news.test/rss.xml";

#[test]
fn test_reads_rss_items() {
    let items = parse_feed(&read_fixture("news.rss"), SOURCE, DEFAULT_LIMIT).unwrap();
    assert_eq!(items.len(), 3);

    let first = &items[0];
    assert_eq!(first.title, "Direct announced");
    assert_eq!(first.link, "https://news.test/articles/direct");
    assert_eq!(first.author.as_deref(), Some("Mario"));
    assert_eq!(
        first.published,
        DateTime::parse_from_rfc3339("2026-10-19T15:04:05+02:00").ok()
    );
    assert_eq!(first.content.as_deref(), Some("<p>The <b>Direct</b> airs today.</p>"));
    assert_eq!(first.content_snippet.as_deref(), Some("The Direct airs today."));
}

#[test]
fn test_missing_fields_get_defaults() {
    let items = parse_feed(&read_fixture("news.rss"), SOURCE, DEFAULT_LIMIT).unwrap();

    let second = &items[1];
    assert_eq!(second.title, "Untitled");
    assert_eq!(second.link, SOURCE);
    assert_eq!(second.author, None);
    assert_eq!(second.published, None);
    assert_eq!(second.content.as_deref(), Some("<p>Only a description</p>"));

    let third = &items[2];
    assert_eq!(third.published, None);
    assert_eq!(third.content, None);
    assert_eq!(third.content_snippet, None);
}

#[test]
fn test_limit_keeps_document_order() {
    let items = parse_feed(&read_fixture("news.rss"), SOURCE, 2).unwrap();
    let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Direct announced", "Untitled"]);

    assert!(parse_feed(&read_fixture("news.rss"), SOURCE, 0).unwrap().is_empty());
}

#[test]
fn test_detail_document() {
    let items = parse_feed(&read_fixture("news.rss"), SOURCE, DEFAULT_LIMIT).unwrap();
    let options = ConvertOptions::default();

    assert_eq!(
        items[0].to_markdown(&options),
        "# Direct announced\n\nThe **Direct** airs today."
    );
    assert_eq!(items[2].to_markdown(&options), "# Third");
}

#[test]
fn test_rss_1_0() {
    let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        xmlns="http://purl.org/rss/1.0/" xmlns:dc="http://purl.org/dc/elements/1.1/">
      <channel rdf:about="https://old.test/"><title>Old</title></channel>
      <item rdf:about="https://old.test/1">
        <title>First</title>
        <link>https://old.test/1</link>
        <dc:date>2026-10-01T08:00:00+00:00</dc:date>
        <dc:creator>Peach</dc:creator>
        <description>Plain text</description>
      </item>
    </rdf:RDF>"#;

    let items = parse_feed(xml, "https://old.test/index.rdf", DEFAULT_LIMIT).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].author.as_deref(), Some("Peach"));
    assert_eq!(items[0].published.map(|date| date.day()), Some(1));
    assert_eq!(items[0].content_snippet.as_deref(), Some("Plain text"));
}

#[test]
fn test_rejects_other_documents() {
    let err = parse_feed("<html><body/></html>", SOURCE, DEFAULT_LIMIT).unwrap_err();
    assert_eq!(err, FeedError::UnsupportedDocument("html".to_string()));

    let err = parse_feed("<rss><channel>", SOURCE, DEFAULT_LIMIT).unwrap_err();
    assert!(matches!(err, FeedError::Xml(_)));
    assert!(err.to_string().starts_with("XML parsing error"));
}
