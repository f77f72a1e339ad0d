//! Feed item rendering for feedmark
//!
//!     This crate turns syndication feed items (RSS/Atom) into Markdown documents that a list
//!     UI can display. It is a pure lib: it powers feedmark-cli but never touches the shell,
//!     the network, std print or env vars.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs                # FeedError
//!     ├── dates.rs                # Relative / long date phrases (presentation helper)
//!     ├── feed                    # Feed item model and the RSS/Atom reader
//!     │   ├── mod.rs
//!     │   ├── parser.rs
//!     │   └── snippet.rs          # Plain-text snippets through html5ever
//!     └── html                    # HTML → Markdown conversion engine
//!         ├── mod.rs              # Pipeline (fixed pass order)
//!         ├── entities.rs
//!         ├── quote.rs            # Quoted forum posts (the only recursive pass)
//!         ├── blocks.rs           # Containers, headings, lists, blockquotes, code
//!         ├── inline.rs           # Emphasis, links, images
//!         ├── escape.rs           # Markdown / attribute escaping, URI encoding
//!         └── scan.rs             # Forgiving tag scanner shared by the passes
//!
//! Core Algorithm
//!
//!     The hard part is the conversion engine. Feed bodies are loosely structured HTML
//!     fragments (forum posts, article bodies, quoted replies), frequently malformed. We do not
//!     build a DOM for them: a browser-grade parser would restructure broken markup in ways the
//!     reader never sees. Instead the engine is a fixed sequence of string passes, each a small
//!     pure function with its own tests, which degrade gracefully on garbage (worst case: stray
//!     characters survive, never an error).
//!
//!     The one recursive step is the quoted-post extractor: the body of a quoted reply is run
//!     through the whole pipeline again and re-emitted as a blockquote, so quotes inside quotes
//!     come out as nested `> > ` lines.
//!
//!     Markdown is less expressive than HTML, so conversion is lossy by design: underline,
//!     CSS, scripts and unknown tags are dropped, keeping only their text.
//!
//! Library Choices
//!
//!     - `regex` for the substitution passes
//!     - `percent-encoding` for image sources
//!     - `roxmltree` for feed documents, `html5ever` for plain-text snippets, `url` for links
//!     - `chrono` for dates
//!     - `tracing` for diagnostics, `thiserror` for the reader's errors
//!
pub mod dates;
pub mod error;
pub mod feed;
pub mod html;

pub use error::FeedError;
pub use feed::{parse_feed, FeedItem, DEFAULT_LIMIT};
pub use html::{html_to_markdown, html_to_markdown_with_options, ConvertOptions};
