//! Error types for markdown conversion.

use crate::text::SpanKind;

/// Why a parent node refused to serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentDefect {
    EmptyTag,
    NoChildren,
}

impl std::fmt::Display for ParentDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParentDefect::EmptyTag => f.write_str("tag is empty"),
            ParentDefect::NoChildren => f.write_str("it has no children"),
        }
    }
}

/// Errors raised while tokenizing, building or serializing a document.
///
/// Every error is terminal for the document being processed. Nothing is
/// emitted for a document that fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A leaf node was serialized without a value.
    #[error("leaf node <{}> has no value", .tag.as_deref().unwrap_or("text"))]
    MissingLeafValue { tag: Option<String> },

    /// A parent node was serialized with an empty tag or no children.
    #[error("parent node <{tag}> cannot be rendered: {defect}")]
    InvalidParent { tag: String, defect: ParentDefect },

    /// A span kind name did not match any known kind.
    #[error("unknown span kind `{0}`")]
    UnknownSpanKind(String),

    /// A span's url did not match its kind: links and images need one,
    /// other kinds must not have one.
    #[error("`{kind}` span {requirement}")]
    InvalidSpanUrl {
        kind: SpanKind,
        requirement: &'static str,
    },

    /// An inline style delimiter was opened but never closed.
    #[error("unterminated `{delimiter}` delimiter in \"{text}\"")]
    UnterminatedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    /// The document has no `# ` heading to take a title from.
    #[error("document has no top-level `# ` heading to use as a title")]
    MissingTitle,

    /// Render configuration could not be parsed.
    #[error("invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
