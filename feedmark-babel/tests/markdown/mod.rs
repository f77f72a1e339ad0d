//! HTML → Markdown conversion tests
//!
//! End-to-end runs of the whole pipeline: the documented behaviour of each pass as seen from
//! the outside, quoted posts, and checks that the output parses into the intended Markdown
//! structure.

mod properties;
mod snapshots;
mod structure;
