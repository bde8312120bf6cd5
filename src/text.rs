//! Inline text spans, the intermediate form between markdown and HTML.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::html::HtmlNode;

/// Inline style of a [`TextSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Normal,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpanKind::Normal => "normal",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }
}

impl FromStr for SpanKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" | "text" => Ok(SpanKind::Normal),
            "bold" => Ok(SpanKind::Bold),
            "italic" => Ok(SpanKind::Italic),
            "code" => Ok(SpanKind::Code),
            "link" => Ok(SpanKind::Link),
            "image" => Ok(SpanKind::Image),
            other => Err(Error::UnknownSpanKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for SpanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline style selected by a delimiter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Code,
}

impl From<InlineStyle> for SpanKind {
    fn from(style: InlineStyle) -> Self {
        match style {
            InlineStyle::Bold => SpanKind::Bold,
            InlineStyle::Italic => SpanKind::Italic,
            InlineStyle::Code => SpanKind::Code,
        }
    }
}

/// A run of inline text with a single style.
///
/// Links and images carry their target; the other kinds never do. The
/// constructors and deserialization both enforce this, and the fields are
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTextSpan")]
pub struct TextSpan {
    text: String,
    kind: SpanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

/// Unchecked wire form of a [`TextSpan`].
#[derive(Deserialize)]
struct RawTextSpan {
    text: String,
    kind: SpanKind,
    #[serde(default)]
    url: Option<String>,
}

impl TryFrom<RawTextSpan> for TextSpan {
    type Error = Error;

    fn try_from(raw: RawTextSpan) -> Result<Self, Self::Error> {
        let wants_url = matches!(raw.kind, SpanKind::Link | SpanKind::Image);
        match (wants_url, raw.url.is_some()) {
            (true, false) => Err(Error::InvalidSpanUrl {
                kind: raw.kind,
                requirement: "needs a url",
            }),
            (false, true) => Err(Error::InvalidSpanUrl {
                kind: raw.kind,
                requirement: "cannot carry a url",
            }),
            _ => Ok(TextSpan {
                text: raw.text,
                kind: raw.kind,
                url: raw.url,
            }),
        }
    }
}

impl TextSpan {
    pub fn normal(text: impl Into<String>) -> Self {
        TextSpan {
            text: text.into(),
            kind: SpanKind::Normal,
            url: None,
        }
    }

    /// A bold, italic or code span.
    pub fn styled(text: impl Into<String>, style: InlineStyle) -> Self {
        TextSpan {
            text: text.into(),
            kind: style.into(),
            url: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        TextSpan {
            text: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    /// An image; `alt` becomes the span text.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        TextSpan {
            text: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_normal(&self) -> bool {
        self.kind == SpanKind::Normal
    }

    /// Convert to the leaf node that renders this span.
    pub fn to_html_node(&self) -> HtmlNode {
        // Only links and images read the url, and they always have one.
        let url = self.url.clone().unwrap_or_default();
        match self.kind {
            SpanKind::Normal => HtmlNode::text(self.text.clone()),
            SpanKind::Bold => HtmlNode::leaf("b", self.text.clone()),
            SpanKind::Italic => HtmlNode::leaf("i", self.text.clone()),
            SpanKind::Code => HtmlNode::leaf("code", self.text.clone()),
            SpanKind::Link => HtmlNode::leaf("a", self.text.clone()).with_attribute("href", url),
            SpanKind::Image => HtmlNode::leaf("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", self.text.clone()),
        }
    }
}

impl From<&TextSpan> for HtmlNode {
    fn from(span: &TextSpan) -> Self {
        span.to_html_node()
    }
}
