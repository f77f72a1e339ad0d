//! Forgiving tag scanner
//!
//! The passes are plain string rewrites, but a few of them must know where an element really
//! ends: a quoted post inside a quoted post closes with the same `</aside>` as its parent, and
//! a list nested in a list item closes with `</ul>`. Matching the first closing tag would cut
//! the outer element in half, so these passes pair tags by counting.
//!
//! Nothing here validates HTML. Unbalanced input falls back to the first closing tag (what a
//! lazy regex would pick) or is left untouched for the final tag-stripping pass.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)([a-z][a-z0-9-]*)[^>]*>").expect("invalid tag regex")
});

/// A single start or end tag found in the source.
#[derive(Debug, Clone)]
pub(crate) struct Tag<'a> {
    pub range: Range<usize>,
    pub name: &'a str,
    pub closing: bool,
    pub self_closing: bool,
}

impl Tag<'_> {
    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An element located in the source: its start tag and the content up to its end tag.
#[derive(Debug, Clone)]
pub(crate) struct Element<'a> {
    pub open_tag: &'a str,
    pub inner: &'a str,
    /// Start tag through end tag
    pub range: Range<usize>,
}

/// Iterate over every tag at or after `from`.
pub(crate) fn tags_from(html: &str, from: usize) -> impl Iterator<Item = Tag<'_>> {
    TAG_PATTERN.captures_iter(&html[from..]).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let name = caps.get(2)?;
        Some(Tag {
            range: from + whole.start()..from + whole.end(),
            name: &html[from + name.start()..from + name.end()],
            closing: !caps[1].is_empty(),
            self_closing: whole.as_str().ends_with("/>"),
        })
    })
}

/// Find the end tag closing an element of `name` whose content starts at `from`.
///
/// Start and end tags of the same name are counted so nested elements are skipped. If the
/// element never balances, the first end tag after `from` is used instead.
pub(crate) fn find_close(html: &str, name: &str, from: usize) -> Option<Range<usize>> {
    let mut depth = 1usize;
    let mut first_close = None;

    for tag in tags_from(html, from).filter(|tag| tag.is(name)) {
        if tag.closing {
            first_close.get_or_insert_with(|| tag.range.clone());
            depth -= 1;
            if depth == 0 {
                return Some(tag.range);
            }
        } else if !tag.self_closing {
            depth += 1;
        }
    }

    first_close
}

/// Tag name of a start tag as written, `h2` for `<h2 id="x">`.
fn open_tag_name(open_tag: &str) -> &str {
    let rest = open_tag.get(1..).unwrap_or_default();
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Elements whose start tag matches `open` and that have an end tag, in source order.
///
/// The end tag is looked up under the name the start tag was written with, so one pattern
/// can cover several elements (`<h1>` to `<h6>`). Start tags that are never closed are
/// skipped. Matches do not overlap: the search resumes after each element found.
pub(crate) fn elements<'a>(html: &'a str, open: &'a Regex) -> impl Iterator<Item = Element<'a>> {
    let mut search = 0;
    std::iter::from_fn(move || {
        while let Some(start) = open.find_at(html, search) {
            let name = open_tag_name(start.as_str());
            let Some(close) = find_close(html, name, start.end()) else {
                search = start.end();
                continue;
            };
            search = close.end;
            return Some(Element {
                open_tag: start.as_str(),
                inner: &html[start.end()..close.start],
                range: start.start()..close.end,
            });
        }
        None
    })
}

/// Locate the first element whose start tag matches `open` and that has an end tag.
pub(crate) fn first_element<'a>(html: &'a str, open: &'a Regex) -> Option<Element<'a>> {
    elements(html, open).next()
}

/// Replace every element whose start tag matches `open`, outermost first.
///
/// The rendered replacement is not scanned again, so the callback is responsible for any
/// nested elements of its own kind (the quote pass recurses on its body, for instance).
pub(crate) fn replace_elements(
    html: &str,
    open: &Regex,
    mut render: impl FnMut(Element<'_>) -> String,
) -> String {
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    for element in elements(html, open) {
        out.push_str(&html[cursor..element.range.start]);
        cursor = element.range.end;
        out.push_str(&render(element));
    }

    out.push_str(&html[cursor..]);
    out
}

struct Frame<'a> {
    name: &'a str,
    open_tag: &'a str,
    body: String,
}

/// Rewrite elements named in `names`, innermost first.
///
/// The callback receives the tag name as written in the source, the start tag and the
/// already rewritten content. Start tags that are never closed are kept as
/// text, as are stray end tags.
pub(crate) fn rewrite_innermost(
    html: &str,
    names: &[&str],
    mut render: impl FnMut(&str, &str, &str) -> String,
) -> String {
    let mut out = String::with_capacity(html.len());
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut cursor = 0;

    for tag in tags_from(html, 0) {
        if tag.self_closing || !names.iter().any(|name| tag.is(name)) {
            continue;
        }

        emit(&mut stack, &mut out, &html[cursor..tag.range.start]);
        cursor = tag.range.end;
        let text = &html[tag.range.clone()];

        if !tag.closing {
            stack.push(Frame {
                name: tag.name,
                open_tag: text,
                body: String::new(),
            });
            continue;
        }

        let Some(index) = stack
            .iter()
            .rposition(|frame| frame.name.eq_ignore_ascii_case(tag.name))
        else {
            emit(&mut stack, &mut out, text);
            continue;
        };

        let unclosed: Vec<Frame<'_>> = stack.drain(index + 1..).collect();
        let Some(mut frame) = stack.pop() else {
            continue;
        };
        for inner in unclosed {
            frame.body.push_str(inner.open_tag);
            frame.body.push_str(&inner.body);
        }

        let rendered = render(frame.name, frame.open_tag, &frame.body);
        emit(&mut stack, &mut out, &rendered);
    }

    emit(&mut stack, &mut out, &html[cursor..]);
    for frame in stack {
        out.push_str(frame.open_tag);
        out.push_str(&frame.body);
    }
    out
}

fn emit(stack: &mut [Frame<'_>], out: &mut String, text: &str) {
    match stack.last_mut() {
        Some(frame) => frame.body.push_str(text),
        None => out.push_str(text),
    }
}
