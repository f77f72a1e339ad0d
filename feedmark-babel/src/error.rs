//! Error types for feed reading
//!
//! The conversion engine itself never fails; only reading a feed document can.

/// Errors that can occur while reading a feed document
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    /// The document is not well-formed XML
    #[error("XML parsing error: {0}")]
    Xml(String),
    /// Well-formed XML, but not an RSS or Atom document
    #[error("Unsupported feed document: root element is <{0}>")]
    UnsupportedDocument(String),
}
