//! `sitegen` — markdown to HTML conversion for a static site generator.
//!
//! A document is split into blank-line separated blocks, each block is
//! classified (heading, fenced code, quote, list or paragraph), its inline
//! markup is tokenized into styled spans, and the spans are wrapped in block
//! elements under a single root container. The resulting [`HtmlNode`] tree
//! serializes to an HTML fragment.
//!
//! Copying assets, walking the content tree and filling page templates are
//! left to the caller; [`render_page`] hands back the two values a page
//! template needs.
//!
//! # Quick start
//!
//! ```
//! let page = sitegen::render_page("# Hello\n\nSome *fine* text.").unwrap();
//! assert_eq!(page.title, "Hello");
//! assert_eq!(page.html, "<div><h1>Hello</h1><p>Some <i>fine</i> text.</p></div>");
//! ```

pub mod blocks;
pub mod config;
pub mod error;
pub mod html;
pub mod inline;
pub mod render_html;
pub mod text;

use serde::Serialize;

pub use blocks::{BlockKind, classify, split_blocks};
pub use config::RenderConfig;
pub use error::*;
pub use html::{Attributes, HtmlNode};
pub use inline::tokenize;
pub use render_html::{Renderer, extract_title, markdown_to_html_node};
pub use text::{InlineStyle, SpanKind, TextSpan};

/// A converted page: the title for the template and the HTML fragment for
/// its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub title: String,
    pub html: String,
}

impl Renderer {
    /// Extract the title and render `markdown` to an HTML fragment.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTitle`] if the document has no `# ` heading, checked
    /// before anything is rendered, then any error from [`Renderer::render`].
    pub fn render_page(&self, markdown: &str) -> Result<RenderedPage> {
        let title = extract_title(markdown)?;
        let html = self.render(markdown)?;
        Ok(RenderedPage { title, html })
    }
}

/// Convert a markdown document to its title and HTML fragment using the
/// default configuration.
///
/// # Errors
///
/// See [`Renderer::render_page`].
pub fn render_page(markdown: &str) -> Result<RenderedPage> {
    Renderer::default().render_page(markdown)
}

/// Convert a markdown document to an HTML fragment using the default
/// configuration.
///
/// # Errors
///
/// See [`Renderer::render`].
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    Renderer::default().render(markdown)
}
