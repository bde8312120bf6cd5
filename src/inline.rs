//! Inline tokenizer: splits a run of markdown text into styled [`TextSpan`]s.
//!
//! Passes run in a fixed order. Links are extracted first, then images, then
//! delimited spans (code, bold, italic). Delimiter characters may appear
//! inside link and image syntax, so those must be lifted out before any
//! delimiter scan. Each pass only looks inside spans still tagged
//! [`crate::text::SpanKind::Normal`]; a span that has been given a style is inert.

use tracing::trace;

use crate::error::{Error, Result};
use crate::text::{InlineStyle, TextSpan};

/// Delimiters in scan order. Two-character delimiters must precede their
/// single-character counterparts.
const DELIMITERS: [(&str, InlineStyle); 5] = [
    ("`", InlineStyle::Code),
    ("**", InlineStyle::Bold),
    ("__", InlineStyle::Bold),
    ("*", InlineStyle::Italic),
    ("_", InlineStyle::Italic),
];

/// Tokenize `text` into spans in source order.
///
/// Text with no inline markup comes back as a single `Normal` span, including
/// the empty string.
///
/// # Errors
///
/// Returns [`Error::UnterminatedDelimiter`] when a style delimiter is opened
/// but not closed within a normal span.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    let spans = vec![TextSpan::normal(text)];
    let spans = split_links(spans);
    let mut spans = split_images(spans);
    for (delimiter, style) in DELIMITERS {
        spans = split_delimited(spans, delimiter, style)?;
    }
    trace!(spans = spans.len(), "tokenized inline text");
    Ok(spans)
}

/// Split every normal span on `delimiter`, turning the text between each pair
/// of delimiters into a span of `style`.
///
/// Empty chunks are dropped, so `**a****b**` yields two bold spans.
///
/// # Errors
///
/// Returns [`Error::UnterminatedDelimiter`] if a span contains an odd number
/// of `delimiter` occurrences.
pub fn split_delimited(
    spans: Vec<TextSpan>,
    delimiter: &'static str,
    style: InlineStyle,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_normal() || !span.text().contains(delimiter) {
            out.push(span);
            continue;
        }

        let chunks: Vec<&str> = span.text().split(delimiter).collect();
        // n delimiters give n + 1 chunks; an even chunk count means an odd
        // delimiter count.
        if chunks.len() % 2 == 0 {
            return Err(Error::UnterminatedDelimiter {
                delimiter,
                text: span.text().to_string(),
            });
        }

        for (i, chunk) in chunks.into_iter().enumerate() {
            if chunk.is_empty() {
                continue;
            }
            out.push(if i % 2 == 0 {
                TextSpan::normal(chunk)
            } else {
                TextSpan::styled(chunk, style)
            });
        }
    }
    Ok(out)
}

/// Lift `[label](url)` links out of normal spans.
///
/// A `[` directly preceded by `!` starts an image and is skipped.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_targets(spans, Target::Link)
}

/// Lift `![alt](url)` images out of normal spans.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_targets(spans, Target::Image)
}

/// All `(label, url)` pairs of links in `text`, left to right.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    extract_targets(text, Target::Link)
}

/// All `(alt, url)` pairs of images in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    extract_targets(text, Target::Image)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Link,
    Image,
}

/// Byte offsets of one `[label](url)` occurrence, with the `!` included in
/// `start` for images.
#[derive(Debug)]
struct TargetMatch {
    start: usize,
    end: usize,
    label: (usize, usize),
    url: (usize, usize),
}

fn extract_targets(text: &str, target: Target) -> Vec<(&str, &str)> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(m) = find_target(text, cursor, target) {
        found.push((&text[m.label.0..m.label.1], &text[m.url.0..m.url.1]));
        cursor = m.end;
    }
    found
}

fn split_targets(spans: Vec<TextSpan>, target: Target) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_normal() {
            out.push(span);
            continue;
        }

        let text = span.text();
        let Some(first) = find_target(text, 0, target) else {
            out.push(span);
            continue;
        };

        let mut cursor = 0;
        let mut next = Some(first);
        while let Some(m) = next {
            if m.start > cursor {
                out.push(TextSpan::normal(&text[cursor..m.start]));
            }
            let label = &text[m.label.0..m.label.1];
            let url = &text[m.url.0..m.url.1];
            out.push(match target {
                Target::Link => TextSpan::link(label, url),
                Target::Image => TextSpan::image(label, url),
            });
            cursor = m.end;
            next = find_target(text, cursor, target);
        }
        if cursor < text.len() {
            out.push(TextSpan::normal(&text[cursor..]));
        }
    }
    out
}

/// Find the leftmost link or image at or after byte `from`.
///
/// The label runs to the first `](` and the url to the next `)`; neither may
/// cross a newline.
fn find_target(text: &str, from: usize, target: Target) -> Option<TargetMatch> {
    let bytes = text.as_bytes();
    let mut search = from;
    while let Some(offset) = text[search..].find('[') {
        let open = search + offset;
        search = open + 1;

        let bang = open > 0 && bytes[open - 1] == b'!';
        let start = match target {
            Target::Link if bang => continue,
            Target::Link => open,
            Target::Image if !bang || open - 1 < from => continue,
            Target::Image => open - 1,
        };

        let line_end = text[open..].find('\n').map_or(text.len(), |n| open + n);
        let line = &text[open + 1..line_end];
        let Some(label_len) = line.find("](") else {
            continue;
        };
        let label = (open + 1, open + 1 + label_len);
        let url_start = label.1 + 2;
        let Some(url_len) = text[url_start..line_end].find(')') else {
            continue;
        };
        let url = (url_start, url_start + url_len);

        return Some(TargetMatch {
            start,
            end: url.1 + 1,
            label,
            url,
        });
    }
    None
}
