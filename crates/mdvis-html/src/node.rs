//! HTML tree node types.

use std::collections::BTreeMap;

/// Elements that never have content or an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A node in an HTML fragment.
///
/// Each node is owned by exactly one parent; a document is a `Vec<HtmlNode>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlNode {
    /// Element with tag, attributes and children.
    Element(Element),
    /// Text content (stored unescaped).
    Text(String),
    /// Comment content (stored without delimiters).
    Comment(String),
}

impl HtmlNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Return the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) | Self::Comment(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    ///
    /// Comments contribute nothing.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

impl From<Element> for HtmlNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

fn collect_text(node: &HtmlNode, out: &mut String) {
    match node {
        HtmlNode::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
        HtmlNode::Text(text) => out.push_str(text),
        HtmlNode::Comment(_) => {}
    }
}

/// An HTML element.
///
/// Attributes are kept sorted by name so serialization is deterministic;
/// their order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name (lowercase for HTML, prefixed as `prefix:local` when namespaced).
    pub tag: String,
    /// Attribute name to value.
    pub attrs: BTreeMap<String, String>,
    /// Child nodes in document order.
    pub children: Vec<HtmlNode>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<HtmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<HtmlNode>) -> Self {
        self.children = children;
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether this is a void element (serialized without an end tag).
    #[must_use]
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }
}
