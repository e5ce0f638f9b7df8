//! Math node recognition.

use crate::mdast::Node;

/// Turn display math written on its own lines into math blocks.
///
/// A paragraph is split around every `$$` span that starts and ends a line,
/// so `before`, the block and `after` end up as siblings.
pub(super) fn promote_display_math(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    let mut out = Vec::with_capacity(children.len());
    for mut child in children.drain(..) {
        match child {
            Node::Paragraph(inline) => split_paragraph(inline, &mut out),
            Node::MathBlock(math) => out.push(Node::MathBlock(trim_display(&math))),
            _ => {
                promote_display_math(&mut child);
                out.push(child);
            }
        }
    }
    *children = out;
}

/// Replace math nodes with the `$` source they were parsed from.
pub(super) fn literalize_math(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for child in children.iter_mut() {
        match child {
            Node::MathInline(math) => *child = Node::Text(format!("${math}$")),
            Node::MathBlock(math) => *child = Node::Text(format!("$${math}$$")),
            _ => literalize_math(child),
        }
    }
}

fn split_paragraph(inline: Vec<Node>, out: &mut Vec<Node>) {
    let own_line: Vec<bool> = (0..inline.len())
        .map(|index| is_own_line_math(&inline, index))
        .collect();

    let mut run = Vec::new();
    for (node, alone) in inline.into_iter().zip(own_line) {
        match node {
            Node::MathBlock(math) if alone => {
                flush_paragraph(&mut run, out);
                out.push(Node::MathBlock(trim_display(&math)));
            }
            other => run.push(other),
        }
    }
    flush_paragraph(&mut run, out);
}

/// Whether the display math at `index` has only line breaks around it.
fn is_own_line_math(inline: &[Node], index: usize) -> bool {
    if !matches!(inline[index], Node::MathBlock(_)) {
        return false;
    }
    let before = inline[..index].iter().rev().find(|node| !is_blank_text(node));
    let after = inline[index + 1..].iter().find(|node| !is_blank_text(node));
    before.is_none_or(is_line_break) && after.is_none_or(is_line_break)
}

fn flush_paragraph(run: &mut Vec<Node>, out: &mut Vec<Node>) {
    let inline = std::mem::take(run);
    let Some(first) = inline.iter().position(|node| !is_blank(node)) else {
        return;
    };
    let last = inline.iter().rposition(|node| !is_blank(node)).unwrap_or(first);
    let trimmed = inline.into_iter().skip(first).take(last - first + 1);
    let mut paragraph = Node::Paragraph(trimmed.collect());
    promote_display_math(&mut paragraph);
    out.push(paragraph);
}

fn is_line_break(node: &Node) -> bool {
    matches!(node, Node::SoftBreak | Node::HardBreak)
}

fn is_blank_text(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.trim().is_empty())
}

fn is_blank(node: &Node) -> bool {
    is_line_break(node) || is_blank_text(node)
}

fn trim_display(math: &str) -> String {
    math.trim_matches(['\n', '\r']).to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_paragraph_with_display_math_promoted() {
        let mut doc = Node::Document(vec![Node::Paragraph(vec![Node::MathBlock(
            "\nx^2\n".to_owned(),
        )])]);
        promote_display_math(&mut doc);
        assert_eq!(doc, Node::Document(vec![Node::MathBlock("x^2".to_owned())]));
    }

    #[test]
    fn test_display_math_between_text_stays_inline() {
        let paragraph = Node::Paragraph(vec![
            Node::Text("see ".to_owned()),
            Node::MathBlock("y".to_owned()),
        ]);
        let mut doc = Node::Document(vec![paragraph.clone()]);
        promote_display_math(&mut doc);
        assert_eq!(doc, Node::Document(vec![paragraph]));
    }

    #[test]
    fn test_display_math_line_splits_paragraph_after() {
        let mut doc = Node::Document(vec![Node::Paragraph(vec![
            Node::MathBlock("\nx\n".to_owned()),
            Node::SoftBreak,
            Node::Text("after".to_owned()),
        ])]);
        promote_display_math(&mut doc);
        assert_eq!(
            doc,
            Node::Document(vec![
                Node::MathBlock("x".to_owned()),
                Node::Paragraph(vec![Node::Text("after".to_owned())]),
            ])
        );
    }

    #[test]
    fn test_display_math_line_splits_paragraph_around() {
        let mut doc = Node::Document(vec![Node::Paragraph(vec![
            Node::Text("before".to_owned()),
            Node::SoftBreak,
            Node::MathBlock("\nx\n".to_owned()),
            Node::SoftBreak,
            Node::Emphasis(vec![Node::Text("after".to_owned())]),
        ])]);
        promote_display_math(&mut doc);
        assert_eq!(
            doc,
            Node::Document(vec![
                Node::Paragraph(vec![Node::Text("before".to_owned())]),
                Node::MathBlock("x".to_owned()),
                Node::Paragraph(vec![Node::Emphasis(vec![Node::Text("after".to_owned())])]),
            ])
        );
    }

    #[test]
    fn test_display_math_mid_line_not_split() {
        let paragraph = Node::Paragraph(vec![
            Node::Text("a".to_owned()),
            Node::SoftBreak,
            Node::MathBlock("y".to_owned()),
            Node::Text(" b".to_owned()),
        ]);
        let mut doc = Node::Document(vec![paragraph.clone()]);
        promote_display_math(&mut doc);
        assert_eq!(doc, Node::Document(vec![paragraph]));
    }

    #[test]
    fn test_promotion_inside_containers() {
        let mut doc = Node::Document(vec![Node::BlockQuote(vec![Node::Paragraph(vec![
            Node::MathBlock("z".to_owned()),
        ])])]);
        promote_display_math(&mut doc);
        assert_eq!(
            doc,
            Node::Document(vec![Node::BlockQuote(vec![Node::MathBlock("z".to_owned())])])
        );
    }

    #[test]
    fn test_literalize_restores_dollars() {
        let mut doc = Node::Document(vec![Node::Paragraph(vec![
            Node::MathInline("a".to_owned()),
            Node::Text(" and ".to_owned()),
            Node::MathBlock("b".to_owned()),
        ])]);
        literalize_math(&mut doc);
        assert_eq!(doc.text_content(), "$a$ and $$b$$");
    }
}
