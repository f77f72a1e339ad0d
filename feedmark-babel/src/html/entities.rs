//! Entity decoding
//!
//! Only the handful of entities feed bodies actually carry are decoded. Everything else
//! (numeric references, `&mdash;` and friends) passes through untouched.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(amp|lt|gt|quot|#39|nbsp);").expect("invalid entity regex")
});

/// Decode `&amp; &lt; &gt; &quot; &#39; &nbsp;` in a single pass.
///
/// `&nbsp;` becomes a plain space. The output is not decoded again, so `&amp;lt;` yields the
/// literal text `&lt;`.
pub fn decode_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &Captures| match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "#39" => "'",
            _ => " ",
        })
        .into_owned()
}
