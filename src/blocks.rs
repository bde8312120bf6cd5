//! Block splitting and classification.
//!
//! A document is cut into blocks at blank lines, and each block is classified
//! by the shape of its lines. Classification never fails; anything that does
//! not fit a more specific kind is a paragraph.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Fence that opens and closes a code block.
pub const CODE_FENCE: &str = "```";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) ").expect("heading pattern is valid"));

/// Structural kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// ATX heading with its level, 1 through 6.
    Heading(u8),
    FencedCode,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

/// Split a document into trimmed, non-empty blocks.
///
/// Any run of blank or whitespace-only lines separates two blocks.
pub fn split_blocks(document: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in document.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                blocks.push(&document[s..end]);
            }
        } else {
            if start.is_none() {
                start = Some(offset);
            }
            end = offset + line.len();
        }
        offset += line.len();
    }
    if let Some(s) = start {
        blocks.push(&document[s..end]);
    }

    blocks
        .into_iter()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect()
}

/// Classify a trimmed block. The first matching rule wins.
pub fn classify(block: &str) -> BlockKind {
    let kind = if let Some(level) = heading_level(block) {
        BlockKind::Heading(level)
    } else if is_fenced_code(block) {
        BlockKind::FencedCode
    } else if block.lines().all(|l| l.starts_with("> ")) {
        BlockKind::Quote
    } else if block
        .lines()
        .all(|l| l.starts_with("* ") || l.starts_with("- "))
    {
        BlockKind::UnorderedList
    } else if is_ordered_list(block) {
        BlockKind::OrderedList
    } else {
        BlockKind::Paragraph
    };
    trace!(?kind, "classified block");
    kind
}

/// Level of a `#`..`######` heading, if `block` starts with one.
pub fn heading_level(block: &str) -> Option<u8> {
    HEADING
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|hashes| u8::try_from(hashes.len()).ok())
}

/// The marker that must open line `index` (0-based) of an ordered list.
pub fn ordered_marker(index: usize) -> String {
    format!("{}. ", index + 1)
}

fn is_fenced_code(block: &str) -> bool {
    // Both fences must fit without sharing backticks.
    if block.len() < CODE_FENCE.len() * 2 {
        return false;
    }
    let first = block.lines().next().unwrap_or_default();
    let last = block.lines().next_back().unwrap_or_default();
    first.starts_with(CODE_FENCE) && last.ends_with(CODE_FENCE)
}

fn is_ordered_list(block: &str) -> bool {
    block
        .lines()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_marker(i)))
}
