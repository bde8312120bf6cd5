//! Markdown document to HTML tree.
//!
//! [`Renderer::build`] splits the document into blocks, classifies each one,
//! tokenizes its inline content and wraps the resulting leaves in the block's
//! element. All blocks become children of one root container. The output is a
//! fragment; no `<html>` or `<body>` wrapper is added.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::blocks::{self, BlockKind, CODE_FENCE};
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::inline::tokenize;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("title pattern is valid"));

/// Builds HTML trees from markdown documents.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the HTML tree for `document`.
    ///
    /// The root is a parent node with the configured tag holding one child
    /// per block, in document order. A document with no blocks yields a root
    /// with no children, which fails to serialize.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnterminatedDelimiter`] if any block's inline content
    /// has an unclosed style delimiter.
    pub fn build(&self, document: &str) -> Result<HtmlNode> {
        let blocks = blocks::split_blocks(document);
        debug!(blocks = blocks.len(), "building document");

        let children = blocks
            .into_iter()
            .map(block_to_node)
            .collect::<Result<Vec<_>>>()?;

        let mut root = HtmlNode::parent(self.config.root_tag.clone(), children);
        if let Some(class) = &self.config.root_class {
            root = root.with_attribute("class", class.clone());
        }
        Ok(root)
    }

    /// Build and serialize `document` to an HTML fragment.
    ///
    /// # Errors
    ///
    /// Any error from [`Renderer::build`] or [`HtmlNode::to_html`].
    pub fn render(&self, document: &str) -> Result<String> {
        self.build(document)?.to_html()
    }
}

/// Build the HTML tree for `document` with the default configuration.
///
/// # Errors
///
/// See [`Renderer::build`].
pub fn markdown_to_html_node(document: &str) -> Result<HtmlNode> {
    Renderer::default().build(document)
}

/// Text of the first `# ` heading line, trimmed.
///
/// # Errors
///
/// Returns [`Error::MissingTitle`] if no line starts with `# `.
pub fn extract_title(document: &str) -> Result<String> {
    let title = TITLE
        .captures(document)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or(Error::MissingTitle)?;
    debug!(%title, "extracted title");
    Ok(title)
}

/// Build the element for one trimmed block.
///
/// # Errors
///
/// Returns [`Error::UnterminatedDelimiter`] from inline tokenizing.
pub fn block_to_node(block: &str) -> Result<HtmlNode> {
    match blocks::classify(block) {
        BlockKind::Heading(level) => {
            let prefix_len = usize::from(level) + 1;
            Ok(HtmlNode::parent(
                format!("h{level}"),
                inline_nodes(&block[prefix_len..])?,
            ))
        }
        BlockKind::FencedCode => {
            let inner = &block[CODE_FENCE.len()..block.len() - CODE_FENCE.len()];
            let code = HtmlNode::parent("code", inline_nodes(inner.trim_matches('\n'))?);
            Ok(HtmlNode::parent("pre", vec![code]))
        }
        BlockKind::Quote => {
            let text = block
                .lines()
                .map(|line| line.strip_prefix("> ").unwrap_or(line))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(HtmlNode::parent("blockquote", inline_nodes(&text)?))
        }
        BlockKind::UnorderedList => {
            let items = block
                .lines()
                .map(|line| {
                    let item = line
                        .strip_prefix("* ")
                        .or_else(|| line.strip_prefix("- "))
                        .unwrap_or(line);
                    list_item(item)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(HtmlNode::parent("ul", items))
        }
        BlockKind::OrderedList => {
            let items = block
                .lines()
                .enumerate()
                .map(|(i, line)| {
                    let item = line
                        .strip_prefix(blocks::ordered_marker(i).as_str())
                        .unwrap_or(line);
                    list_item(item)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(HtmlNode::parent("ol", items))
        }
        BlockKind::Paragraph => Ok(HtmlNode::parent("p", inline_nodes(block)?)),
    }
}

fn list_item(text: &str) -> Result<HtmlNode> {
    Ok(HtmlNode::parent("li", inline_nodes(text)?))
}

fn inline_nodes(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(tokenize(text)?.iter().map(HtmlNode::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParentDefect;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn child_tags(node: &HtmlNode) -> Vec<&str> {
        node.children().iter().filter_map(HtmlNode::tag).collect()
    }

    #[test]
    fn every_block_kind() {
        let markdown = r#"
# Heading 1

## Heading 2

### Heading 3

#### Heading 4

##### Heading 5

###### Heading 6

```
print("Hello world")
```

> We are the hollow men
> We are the stuffed men
> Leaning together
> Headpiece filled with straw. Alas!

* bullet
* points

* more
- bullet
- points

1. a
2. list
3. in
4. order

a paragraph of normal text
        "#;

        let expected = HtmlNode::parent(
            "div",
            vec![
                HtmlNode::parent("h1", vec![HtmlNode::text("Heading 1")]),
                HtmlNode::parent("h2", vec![HtmlNode::text("Heading 2")]),
                HtmlNode::parent("h3", vec![HtmlNode::text("Heading 3")]),
                HtmlNode::parent("h4", vec![HtmlNode::text("Heading 4")]),
                HtmlNode::parent("h5", vec![HtmlNode::text("Heading 5")]),
                HtmlNode::parent("h6", vec![HtmlNode::text("Heading 6")]),
                HtmlNode::parent(
                    "pre",
                    vec![HtmlNode::parent(
                        "code",
                        vec![HtmlNode::text(r#"print("Hello world")"#)],
                    )],
                ),
                HtmlNode::parent(
                    "blockquote",
                    vec![HtmlNode::text(
                        "We are the hollow men\nWe are the stuffed men\nLeaning together\nHeadpiece filled with straw. Alas!",
                    )],
                ),
                HtmlNode::parent(
                    "ul",
                    vec![
                        HtmlNode::parent("li", vec![HtmlNode::text("bullet")]),
                        HtmlNode::parent("li", vec![HtmlNode::text("points")]),
                    ],
                ),
                HtmlNode::parent(
                    "ul",
                    vec![
                        HtmlNode::parent("li", vec![HtmlNode::text("more")]),
                        HtmlNode::parent("li", vec![HtmlNode::text("bullet")]),
                        HtmlNode::parent("li", vec![HtmlNode::text("points")]),
                    ],
                ),
                HtmlNode::parent(
                    "ol",
                    vec![
                        HtmlNode::parent("li", vec![HtmlNode::text("a")]),
                        HtmlNode::parent("li", vec![HtmlNode::text("list")]),
                        HtmlNode::parent("li", vec![HtmlNode::text("in")]),
                        HtmlNode::parent("li", vec![HtmlNode::text("order")]),
                    ],
                ),
                HtmlNode::parent("p", vec![HtmlNode::text("a paragraph of normal text")]),
            ],
        );

        assert_eq!(markdown_to_html_node(markdown).unwrap(), expected);
    }

    #[test]
    fn mixed_document_block_order() {
        let markdown =
            "# Heading 1\n\n> quoted\n\n* one\n* two\n\n1. first\n2. second\n\nplain text";
        let root = markdown_to_html_node(markdown).unwrap();
        assert_eq!(root.tag(), Some("div"));
        assert_eq!(child_tags(&root), vec!["h1", "blockquote", "ul", "ol", "p"]);
        assert_eq!(root.children()[2].children().len(), 2);
        assert_eq!(root.children()[3].children().len(), 2);
        assert_eq!(extract_title(markdown).unwrap(), "Heading 1");
    }

    #[test]
    fn inline_styles_inside_blocks() {
        let html = Renderer::default()
            .render("## A **bold** move\n\n* see [docs](https://docs.rs)\n* run `cargo`")
            .unwrap();
        assert_eq!(
            html,
            concat!(
                "<div>",
                "<h2>A <b>bold</b> move</h2>",
                "<ul>",
                r#"<li>see <a href="https://docs.rs">docs</a></li>"#,
                "<li>run <code>cargo</code></li>",
                "</ul>",
                "</div>"
            )
        );
    }

    #[test]
    fn paragraph_keeps_line_breaks() {
        let html = Renderer::default()
            .render("first line\nsecond *line*")
            .unwrap();
        assert_eq!(html, "<div><p>first line\nsecond <i>line</i></p></div>");
    }

    #[test]
    fn code_block_is_tokenized_like_prose() {
        let html = Renderer::default()
            .render("```\nlet x = *ptr*;\n```")
            .unwrap();
        assert_eq!(html, "<div><pre><code>let x = <i>ptr</i>;</code></pre></div>");
    }

    #[test]
    fn single_line_and_empty_code_blocks() {
        let html = Renderer::default().render("```inline code```").unwrap();
        assert_eq!(html, "<div><pre><code>inline code</code></pre></div>");

        let html = Renderer::default().render("``````").unwrap();
        assert_eq!(html, "<div><pre><code></code></pre></div>");
    }

    #[test]
    fn quote_with_image() {
        let html = Renderer::default()
            .render("> look\n> ![a cat](cat.png)")
            .unwrap();
        assert_eq!(
            html,
            r#"<div><blockquote>look
<img src="cat.png" alt="a cat"></img></blockquote></div>"#
        );
    }

    #[test]
    fn ordered_list_markers_are_stripped() {
        let root = block_to_node("1. one\n2. two\n3. three").unwrap();
        assert_eq!(
            root.to_html().unwrap(),
            "<ol><li>one</li><li>two</li><li>three</li></ol>"
        );
    }

    #[test]
    fn out_of_order_list_is_paragraph() {
        let node = block_to_node("1. a\n3. b").unwrap();
        assert_eq!(node.tag(), Some("p"));
    }

    #[test]
    fn unterminated_delimiter_propagates() {
        let err = markdown_to_html_node("# Title\n\nsome **broken text").unwrap_err();
        assert!(matches!(err, Error::UnterminatedDelimiter { .. }));
    }

    #[test]
    fn empty_document_fails_to_serialize() {
        let root = markdown_to_html_node("\n\n").unwrap();
        assert!(matches!(
            root.to_html(),
            Err(Error::InvalidParent {
                defect: ParentDefect::NoChildren,
                ..
            })
        ));
    }

    #[test]
    fn configured_root() {
        let renderer = Renderer::new(RenderConfig {
            root_tag: "article".into(),
            root_class: Some("post".into()),
        });
        assert_eq!(
            renderer.render("hello").unwrap(),
            r#"<article class="post"><p>hello</p></article>"#
        );
    }

    #[test]
    fn empty_root_tag_is_invalid_parent() {
        let renderer = Renderer::new(RenderConfig {
            root_tag: String::new(),
            root_class: None,
        });
        assert!(matches!(
            renderer.render("hello"),
            Err(Error::InvalidParent {
                defect: ParentDefect::EmptyTag,
                ..
            })
        ));
    }

    #[test]
    fn title_is_first_h1_line() {
        let doc = "intro\n\n## Not this\n\n#  Spaced Title  \n\n# Second";
        assert_eq!(extract_title(doc).unwrap(), "Spaced Title");
    }

    #[test]
    fn title_missing() {
        assert!(matches!(
            extract_title("## only h2\n\nbody"),
            Err(Error::MissingTitle)
        ));
        assert!(matches!(extract_title("#NoSpace"), Err(Error::MissingTitle)));
    }

    proptest! {
        #[test]
        fn well_formed_documents_render(
            heading in "[A-Za-z][A-Za-z ]{0,19}",
            items in proptest::collection::vec("[a-z]{1,10}", 1..5),
            body in "[a-z]{1,10}( [a-z]{1,10}){0,5}",
            bold in "[a-z]{1,8}",
        ) {
            let list = items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n");
            let ordered = items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {item}", i + 1))
                .collect::<Vec<_>>()
                .join("\n");
            let doc = format!(
                "# {heading}\n\n{list}\n\n{ordered}\n\n> {body}\n\n{body} **{bold}** end"
            );

            let root = markdown_to_html_node(&doc).unwrap();
            let first = root.to_html().unwrap();
            prop_assert_eq!(&first, &root.to_html().unwrap());
            prop_assert_eq!(child_tags(&root), vec!["h1", "ul", "ol", "blockquote", "p"]);
            prop_assert_eq!(root.children()[1].children().len(), items.len());
            let bold_tag = format!("<b>{}</b>", bold);
            prop_assert!(first.contains(&bold_tag));
        }
    }
}
