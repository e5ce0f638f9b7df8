//! HTML5 fragment parser.
//!
//! Wraps `html5ever`'s fragment algorithm so raw HTML is tokenized exactly as
//! a browser would tokenize it, then converts the resulting DOM into owned
//! [`HtmlNode`] trees.

use std::collections::BTreeMap;

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::node::{Element, HtmlNode};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Maximum element nesting kept as structure.
///
/// Deeper subtrees collapse to their text content so recursive consumers of
/// the tree stay within a bounded stack depth.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse an HTML fragment as if it were the content of a `context` element.
///
/// Never fails: malformed markup is repaired by the HTML5 tree builder.
/// Doctypes and processing instructions are discarded; comments are kept so
/// the sanitizer can see (and drop) them.
///
/// # Examples
///
/// ```
/// use mdvis_html::parse_fragment;
///
/// let nodes = parse_fragment("<td>cell", "tr");
/// assert_eq!(nodes[0].as_element().map(|e| e.tag.as_str()), Some("td"));
/// ```
pub fn parse_fragment(html: &str, context: &str) -> Vec<HtmlNode> {
    let context_name = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(context),
    );
    let dom = html5ever::parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        context_name,
        Vec::new(),
    )
    .one(html);

    // Fragment parsing places the result under a synthetic <html> root.
    let root = dom.document.children.borrow().first().cloned();
    let mut out = Vec::new();
    if let Some(root) = root {
        convert_children(&root, 0, &mut out);
    }
    out
}

fn convert_children(handle: &Handle, depth: usize, out: &mut Vec<HtmlNode>) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Element { name, attrs, .. } => {
                if depth >= MAX_NESTING_DEPTH {
                    out.push(HtmlNode::Text(flatten_text(child)));
                    continue;
                }
                let mut element = Element::new(qualified_name(name));
                element.attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (qualified_name(&attr.name), attr.value.to_string()))
                    .collect::<BTreeMap<_, _>>();
                convert_children(child, depth + 1, &mut element.children);
                out.push(HtmlNode::Element(element));
            }
            NodeData::Text { contents } => {
                out.push(HtmlNode::Text(contents.borrow().to_string()));
            }
            NodeData::Comment { contents } => {
                out.push(HtmlNode::Comment(contents.to_string()));
            }
            NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {}
        }
    }
}

/// Collect the text of a subtree without recursion.
fn flatten_text(handle: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        if let NodeData::Text { contents } = &node.data {
            text.push_str(&contents.borrow());
        }
        // Push in reverse so children are visited in document order.
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    text
}

fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", &**prefix, &*name.local),
        None => name.local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(node: &HtmlNode) -> &Element {
        node.as_element().expect("expected element")
    }

    #[test]
    fn test_parse_simple_element() {
        let nodes = parse_fragment("<p>Hello</p>", "div");
        assert_eq!(nodes.len(), 1);
        let p = element(&nodes[0]);
        assert_eq!(p.tag, "p");
        assert_eq!(p.children, vec![HtmlNode::text("Hello")]);
    }

    #[test]
    fn test_parse_attributes_decoded() {
        let nodes = parse_fragment(r#"<a href="x?a=1&amp;b=2" title='t'>x</a>"#, "div");
        let a = element(&nodes[0]);
        assert_eq!(a.attr("href"), Some("x?a=1&b=2"));
        assert_eq!(a.attr("title"), Some("t"));
    }

    #[test]
    fn test_parse_entity_in_text() {
        let nodes = parse_fragment("&lt;img src=x&gt;", "pre");
        assert_eq!(nodes, vec![HtmlNode::text("<img src=x>")]);
    }

    #[test]
    fn test_parse_unclosed_tags_repaired() {
        let nodes = parse_fragment("<div><em>open", "div");
        let div = element(&nodes[0]);
        let em = element(&div.children[0]);
        assert_eq!(em.tag, "em");
        assert_eq!(em.children, vec![HtmlNode::text("open")]);
    }

    #[test]
    fn test_parse_keeps_comments() {
        let nodes = parse_fragment("a<!-- note -->b", "div");
        assert_eq!(
            nodes,
            vec![
                HtmlNode::text("a"),
                HtmlNode::Comment(" note ".to_owned()),
                HtmlNode::text("b"),
            ]
        );
    }

    #[test]
    fn test_parse_script_is_an_element() {
        let nodes = parse_fragment("<script>alert(1)</script>", "div");
        let script = element(&nodes[0]);
        assert_eq!(script.tag, "script");
        assert_eq!(script.children, vec![HtmlNode::text("alert(1)")]);
    }

    #[test]
    fn test_parse_namespaced_attribute() {
        let nodes = parse_fragment(
            r#"<svg><a xlink:href="javascript:alert(1)">x</a></svg>"#,
            "div",
        );
        let svg = element(&nodes[0]);
        let a = element(&svg.children[0]);
        assert_eq!(a.attr("xlink:href"), Some("javascript:alert(1)"));
        assert_eq!(a.attr("href"), None);
    }

    #[test]
    fn test_parse_table_context() {
        let nodes = parse_fragment("<td>1</td><td>2</td>", "tr");
        assert_eq!(nodes.len(), 2);
        assert_eq!(element(&nodes[1]).tag, "td");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_fragment("", "div").is_empty());
    }

    #[test]
    fn test_parse_deep_nesting_is_flattened() {
        let depth = MAX_NESTING_DEPTH + 50;
        let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let nodes = parse_fragment(&html, "div");

        let mut current = &nodes[0];
        let mut levels = 0;
        while let HtmlNode::Element(element) = current {
            levels += 1;
            current = &element.children[0];
        }
        assert_eq!(levels, MAX_NESTING_DEPTH);
        assert_eq!(current, &HtmlNode::text("deep"));
    }
}
