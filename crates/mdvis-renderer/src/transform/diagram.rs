//! Diagram code block rewriting.
//!
//! A fenced block whose language is [`DIAGRAM_LANGUAGE`] becomes a
//! `<pre class="mermaid">` container holding the escaped diagram source, for
//! a client-side renderer to pick up. The source stays inert text: it is
//! escaped here and parsed back into a text node during projection.

use mdvis_html::escape_text;

use crate::mdast::Node;

/// Code block language that marks a diagram.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Class of the emitted diagram container.
pub const DIAGRAM_CLASS: &str = "mermaid";

/// Build the diagram container for a diagram source.
///
/// ```
/// use mdvis_renderer::transform::diagram_html;
///
/// assert_eq!(
///     diagram_html("a<b"),
///     r#"<pre class="mermaid">a&lt;b</pre>"#
/// );
/// ```
#[must_use]
pub fn diagram_html(source: &str) -> String {
    // HTML parsing drops one newline right after <pre>
    let lead = if source.starts_with('\n') { "\n" } else { "" };
    format!(
        r#"<pre class="{DIAGRAM_CLASS}">{lead}{}</pre>"#,
        escape_text(source)
    )
}

pub(super) fn rewrite_diagrams(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for child in children.iter_mut() {
        if child.lang() == Some(DIAGRAM_LANGUAGE) {
            if let Node::CodeBlock { value, .. } = child {
                tracing::debug!(len = value.len(), "Rewrote diagram code block");
                let html = diagram_html(value);
                *child = Node::RawHtml(html);
            }
        } else {
            rewrite_diagrams(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn code(info: &str, value: &str) -> Node {
        Node::CodeBlock {
            info: Some(info.to_owned()),
            value: value.to_owned(),
        }
    }

    #[test]
    fn test_rewrites_mermaid_block() {
        let mut doc = Node::Document(vec![code("mermaid", "graph TD;\nA-->B\n")]);
        rewrite_diagrams(&mut doc);
        assert_eq!(
            doc,
            Node::Document(vec![Node::RawHtml(
                "<pre class=\"mermaid\">graph TD;\nA--&gt;B\n</pre>".to_owned()
            )])
        );
    }

    #[test]
    fn test_escapes_markup_in_source() {
        assert_eq!(
            diagram_html("<img src=x onerror=alert(1)>"),
            "<pre class=\"mermaid\">&lt;img src=x onerror=alert(1)&gt;</pre>"
        );
    }

    #[test]
    fn test_keeps_leading_newline() {
        assert_eq!(diagram_html("\nA"), "<pre class=\"mermaid\">\n\nA</pre>");
    }

    #[test]
    fn test_other_languages_untouched() {
        let original = Node::Document(vec![
            code("rust", "fn main() {}\n"),
            code("Mermaid", "A\n"),
            code("mermaidx", "B\n"),
        ]);
        let mut doc = original.clone();
        rewrite_diagrams(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_rewrites_nested_block() {
        let mut doc = Node::Document(vec![Node::List {
            start: None,
            children: vec![Node::ListItem(vec![code("mermaid extra", "A\n")])],
        }]);
        rewrite_diagrams(&mut doc);
        assert_eq!(
            doc,
            Node::Document(vec![Node::List {
                start: None,
                children: vec![Node::ListItem(vec![Node::RawHtml(
                    "<pre class=\"mermaid\">A\n</pre>".to_owned()
                )])],
            }])
        );
    }
}
