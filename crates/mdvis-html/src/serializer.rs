//! HTML serializer.
//!
//! Escapes every text node and attribute value regardless of which element
//! it belongs to, so the output cannot be reinterpreted as markup when it is
//! embedded into a larger document.

use crate::escape::{escape_attr, escape_text};
use crate::node::HtmlNode;

/// Serialize a fragment to HTML text.
///
/// # Examples
///
/// ```
/// use mdvis_html::{Element, HtmlNode, serialize};
///
/// let img = Element::new("img").with_attr("alt", "a \"quote\"").with_attr("src", "x.png");
/// assert_eq!(
///     serialize(&[HtmlNode::from(img)]),
///     r#"<img alt="a &quot;quote&quot;" src="x.png">"#
/// );
/// ```
pub fn serialize(nodes: &[HtmlNode]) -> String {
    let mut out = String::with_capacity(4096);
    for node in nodes {
        serialize_node(node, &mut out);
    }
    out
}

fn serialize_node(node: &HtmlNode, out: &mut String) {
    match node {
        HtmlNode::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');

            if element.is_void() {
                return;
            }

            for child in &element.children {
                serialize_node(child, out);
            }

            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
        HtmlNode::Text(text) => out.push_str(&escape_text(text)),
        HtmlNode::Comment(text) => {
            // Without '>' neither "-->" nor "--!>" can close the comment early.
            out.push_str("<!--");
            out.push_str(&text.replace('>', "&gt;"));
            out.push_str("-->");
        }
    }
}
