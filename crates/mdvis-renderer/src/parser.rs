//! Markdown parsing into the [`Node`] syntax tree.
//!
//! Builds the tree from pulldown-cmark events with an explicit stack of open
//! containers. Containers nested deeper than [`MAX_NESTING_DEPTH`] are
//! flattened into their parent so later stages can recurse safely.

use mdvis_html::MAX_NESTING_DEPTH;
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag};

use crate::mdast::{Alignment, Node};
use crate::util::{convert_alignment, heading_level_to_num};

/// Markdown dialect switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// GitHub Flavored Markdown: tables, strikethrough, task lists.
    pub gfm: bool,
    /// `$inline$` and `$$display$$` math.
    pub math: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            math: true,
        }
    }
}

impl ParseOptions {
    /// Get pulldown-cmark options for this dialect.
    #[must_use]
    pub fn parser_options(self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM;
        }
        if self.math {
            options |= Options::ENABLE_MATH;
        }
        options
    }
}

/// Parse Markdown into a [`Node::Document`].
///
/// Never fails: every input has a tree.
///
/// # Examples
///
/// ```
/// use mdvis_renderer::mdast::Node;
/// use mdvis_renderer::parser::{ParseOptions, parse};
///
/// let doc = parse("*hi*", ParseOptions::default());
/// assert_eq!(
///     doc,
///     Node::Document(vec![Node::Paragraph(vec![Node::Emphasis(vec![
///         Node::Text("hi".to_owned())
///     ])])])
/// );
/// ```
#[must_use]
pub fn parse(markdown: &str, options: ParseOptions) -> Node {
    let parser = Parser::new_ext(markdown, options.parser_options());
    TreeBuilder::new().build(parser)
}

/// Container waiting for its end event.
enum Frame {
    Document,
    Heading(u8),
    Paragraph,
    BlockQuote,
    List(Option<u64>),
    ListItem,
    Table(Vec<Alignment>),
    TableHead,
    TableRow,
    TableCell,
    CodeBlock(Option<String>),
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, title: String },
    Image { url: String, title: String },
    /// Children are spliced into the parent.
    Transparent,
}

impl Frame {
    /// Containers that can nest without bound in Markdown source.
    fn is_nestable(&self) -> bool {
        matches!(
            self,
            Self::BlockQuote
                | Self::List(_)
                | Self::ListItem
                | Self::Emphasis
                | Self::Strong
                | Self::Strikethrough
                | Self::Link { .. }
        )
    }
}

struct Open {
    frame: Frame,
    children: Vec<Node>,
    code: String,
}

enum Closed {
    Node(Node),
    Splice(Vec<Node>),
}

impl Open {
    fn new(frame: Frame) -> Self {
        Self {
            frame,
            children: Vec::new(),
            code: String::new(),
        }
    }

    fn close(self) -> Closed {
        let children = self.children;
        let node = match self.frame {
            Frame::Document => Node::Document(children),
            Frame::Heading(level) => Node::Heading { level, children },
            Frame::Paragraph => Node::Paragraph(children),
            Frame::BlockQuote => Node::BlockQuote(children),
            Frame::List(start) => Node::List { start, children },
            Frame::ListItem => Node::ListItem(children),
            Frame::Table(alignments) => Node::Table {
                alignments,
                children,
            },
            Frame::TableHead | Frame::TableRow => Node::TableRow(children),
            Frame::TableCell => Node::TableCell(children),
            Frame::CodeBlock(info) => Node::CodeBlock {
                info,
                value: self.code,
            },
            Frame::Emphasis => Node::Emphasis(children),
            Frame::Strong => Node::Strong(children),
            Frame::Strikethrough => Node::Strikethrough(children),
            Frame::Link { url, title } => Node::Link {
                url,
                title,
                children,
            },
            Frame::Image { url, title } => {
                let alt = Node::Paragraph(children).text_content();
                Node::Image { url, title, alt }
            }
            Frame::Transparent => return Closed::Splice(children),
        };
        Closed::Node(node)
    }
}

struct TreeBuilder {
    stack: Vec<Open>,
    flattened: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Open::new(Frame::Document)],
            flattened: 0,
        }
    }

    fn build<'a>(mut self, events: impl Iterator<Item = Event<'a>>) -> Node {
        for event in events {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(_) => self.end_tag(),
                Event::Text(text) => self.text(&text),
                Event::Code(code) => self.push(Node::InlineCode(code.into_string())),
                Event::InlineMath(math) => self.push(Node::MathInline(math.into_string())),
                Event::DisplayMath(math) => self.push(Node::MathBlock(math.into_string())),
                Event::Html(html) | Event::InlineHtml(html) => {
                    self.push(Node::RawHtml(html.into_string()));
                }
                Event::FootnoteReference(label) => self.push(Node::Text(format!("[^{label}]"))),
                Event::SoftBreak => self.push(Node::SoftBreak),
                Event::HardBreak => self.push(Node::HardBreak),
                Event::Rule => self.push(Node::ThematicBreak),
                Event::TaskListMarker(checked) => self.push(Node::TaskListMarker(checked)),
            }
        }

        while self.stack.len() > 1 {
            self.end_tag();
        }
        if self.flattened > 0 {
            tracing::warn!(
                containers = self.flattened,
                limit = MAX_NESTING_DEPTH,
                "Flattened deeply nested containers"
            );
        }
        self.stack
            .pop()
            .map_or_else(|| Node::Document(Vec::new()), |root| Node::Document(root.children))
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => Frame::Heading(heading_level_to_num(level)),
            Tag::BlockQuote(_) => Frame::BlockQuote,
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                    Frame::CodeBlock(Some(info.into_string()))
                }
                CodeBlockKind::Fenced(_) | CodeBlockKind::Indented => Frame::CodeBlock(None),
            },
            Tag::List(start) => Frame::List(start),
            Tag::Item => Frame::ListItem,
            Tag::Table(alignments) => {
                Frame::Table(alignments.into_iter().map(convert_alignment).collect())
            }
            Tag::TableHead => Frame::TableHead,
            Tag::TableRow => Frame::TableRow,
            Tag::TableCell => Frame::TableCell,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Strikethrough,
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let url = if link_type == LinkType::Email {
                    format!("mailto:{dest_url}")
                } else {
                    dest_url.into_string()
                };
                Frame::Link {
                    url,
                    title: title.into_string(),
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                url: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::HtmlBlock
            | Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => Frame::Transparent,
        };

        let frame = if frame.is_nestable() && self.stack.len() >= MAX_NESTING_DEPTH {
            self.flattened += 1;
            Frame::Transparent
        } else {
            frame
        };
        self.stack.push(Open::new(frame));
    }

    fn end_tag(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(open) = self.stack.pop() else {
            return;
        };
        match open.close() {
            Closed::Node(node) => self.push(node),
            Closed::Splice(children) => {
                for child in children {
                    self.push(child);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(open) = self.stack.last_mut()
            && matches!(open.frame, Frame::CodeBlock(_))
        {
            open.code.push_str(text);
            return;
        }
        self.push(Node::Text(text.to_owned()));
    }

    /// Append to the innermost open container, merging adjacent text.
    fn push(&mut self, node: Node) {
        let Some(open) = self.stack.last_mut() else {
            return;
        };
        if let Node::Text(text) = &node
            && let Some(Node::Text(previous)) = open.children.last_mut()
        {
            previous.push_str(text);
            return;
        }
        open.children.push(node);
    }
}
