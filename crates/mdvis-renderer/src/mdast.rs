//! Markdown syntax tree.
//!
//! The node set is closed: the parser produces it, the transform stage
//! rewrites it in place, and projection consumes it.

/// Column alignment of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value for the HTML `align` attribute.
    #[must_use]
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

/// A node of the Markdown syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Document root.
    Document(Vec<Node>),
    /// ATX or setext heading, level 1-6.
    Heading { level: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    BlockQuote(Vec<Node>),
    /// Ordered list when `start` is set, bullet list otherwise.
    List {
        start: Option<u64>,
        children: Vec<Node>,
    },
    ListItem(Vec<Node>),
    /// GFM task list checkbox.
    TaskListMarker(bool),
    /// GFM table; the first row is the header row.
    Table {
        alignments: Vec<Alignment>,
        children: Vec<Node>,
    },
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    /// Fenced or indented code block.
    ///
    /// `info` is the fence info string exactly as written. It is untrusted.
    CodeBlock { info: Option<String>, value: String },
    InlineCode(String),
    MathInline(String),
    MathBlock(String),
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    Strikethrough(Vec<Node>),
    Link {
        url: String,
        title: String,
        children: Vec<Node>,
    },
    Image {
        url: String,
        title: String,
        alt: String,
    },
    /// Verbatim HTML, parsed and sanitized downstream.
    RawHtml(String),
    Text(String),
    SoftBreak,
    HardBreak,
    ThematicBreak,
}

impl Node {
    /// Child nodes of a container; `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Document(children)
            | Self::Heading { children, .. }
            | Self::Paragraph(children)
            | Self::BlockQuote(children)
            | Self::List { children, .. }
            | Self::ListItem(children)
            | Self::Table { children, .. }
            | Self::TableRow(children)
            | Self::TableCell(children)
            | Self::Emphasis(children)
            | Self::Strong(children)
            | Self::Strikethrough(children)
            | Self::Link { children, .. } => Some(children),
            Self::TaskListMarker(_)
            | Self::CodeBlock { .. }
            | Self::InlineCode(_)
            | Self::MathInline(_)
            | Self::MathBlock(_)
            | Self::Image { .. }
            | Self::RawHtml(_)
            | Self::Text(_)
            | Self::SoftBreak
            | Self::HardBreak
            | Self::ThematicBreak => None,
        }
    }

    /// Mutable child nodes of a container; `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Document(children)
            | Self::Heading { children, .. }
            | Self::Paragraph(children)
            | Self::BlockQuote(children)
            | Self::List { children, .. }
            | Self::ListItem(children)
            | Self::Table { children, .. }
            | Self::TableRow(children)
            | Self::TableCell(children)
            | Self::Emphasis(children)
            | Self::Strong(children)
            | Self::Strikethrough(children)
            | Self::Link { children, .. } => Some(children),
            Self::TaskListMarker(_)
            | Self::CodeBlock { .. }
            | Self::InlineCode(_)
            | Self::MathInline(_)
            | Self::MathBlock(_)
            | Self::Image { .. }
            | Self::RawHtml(_)
            | Self::Text(_)
            | Self::SoftBreak
            | Self::HardBreak
            | Self::ThematicBreak => None,
        }
    }

    /// Language of a code block: the first word of its info string.
    ///
    /// ```
    /// use mdvis_renderer::mdast::Node;
    ///
    /// let block = Node::CodeBlock {
    ///     info: Some("rust title=main.rs".to_owned()),
    ///     value: String::new(),
    /// };
    /// assert_eq!(block.lang(), Some("rust"));
    /// ```
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        match self {
            Self::CodeBlock { info: Some(info), .. } => info.split_whitespace().next(),
            _ => None,
        }
    }

    /// Plain text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text)
        | Node::InlineCode(text)
        | Node::MathInline(text)
        | Node::MathBlock(text) => out.push_str(text),
        Node::CodeBlock { value, .. } => out.push_str(value),
        Node::Image { alt, .. } => out.push_str(alt),
        Node::SoftBreak | Node::HardBreak => out.push('\n'),
        _ => {
            for child in node.children().unwrap_or_default() {
                collect_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_first_word() {
        let block = Node::CodeBlock {
            info: Some("mermaid  extra words".to_owned()),
            value: String::new(),
        };
        assert_eq!(block.lang(), Some("mermaid"));
    }

    #[test]
    fn test_lang_absent() {
        let block = Node::CodeBlock {
            info: None,
            value: String::new(),
        };
        assert_eq!(block.lang(), None);
        assert_eq!(Node::Text("x".to_owned()).lang(), None);
    }

    #[test]
    fn test_text_content() {
        let node = Node::Paragraph(vec![
            Node::Text("a ".to_owned()),
            Node::Strong(vec![Node::Text("b".to_owned())]),
            Node::SoftBreak,
            Node::InlineCode("c".to_owned()),
        ]);
        assert_eq!(node.text_content(), "a b\nc");
    }

    #[test]
    fn test_alignment_attr() {
        assert_eq!(Alignment::None.as_attr(), None);
        assert_eq!(Alignment::Center.as_attr(), Some("center"));
    }
}
