//! Projection of the Markdown tree onto an HTML tree.
//!
//! Raw HTML is never passed through as text. Whenever a container holds raw
//! HTML, the whole run of its children is serialized and parsed again as an
//! HTML fragment in the container's context. Tags split across several raw
//! HTML nodes (`<b>` ... `</b>`) then rebuild into real elements that the
//! sanitizer can inspect.

use mdvis_html::{Element, HtmlNode, parse_fragment, serialize};

use crate::mdast::{Alignment, Node};

/// Class of inline math containers.
pub const MATH_INLINE_CLASS: &str = "math math-inline";

/// Class of display math containers.
pub const MATH_DISPLAY_CLASS: &str = "math math-display";

/// Project a Markdown tree into HTML nodes.
///
/// A [`Node::Document`] yields its children; any other node yields the
/// nodes it renders to.
///
/// # Examples
///
/// ```
/// use mdvis_html::serialize;
/// use mdvis_renderer::mdast::Node;
/// use mdvis_renderer::projection::project;
///
/// let doc = Node::Document(vec![Node::Paragraph(vec![
///     Node::Text("a ".to_owned()),
///     Node::RawHtml("<b>".to_owned()),
///     Node::Text("b".to_owned()),
///     Node::RawHtml("</b>".to_owned()),
/// ])]);
/// assert_eq!(serialize(&project(doc)), "<p>a <b>b</b></p>");
/// ```
#[must_use]
pub fn project(node: Node) -> Vec<HtmlNode> {
    match node {
        Node::Document(children) => project_children(children, "div", false),
        other => {
            let mut out = Vec::new();
            project_node(other, false, &mut out);
            out
        }
    }
}

/// Project the children of an element named `context`.
fn project_children(children: Vec<Node>, context: &str, inline: bool) -> Vec<HtmlNode> {
    let has_raw = children.iter().any(|child| matches!(child, Node::RawHtml(_)));
    if !has_raw {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            project_node(child, inline, &mut out);
        }
        return out;
    }

    let mut html = String::new();
    let mut projected = Vec::new();
    for child in children {
        if let Node::RawHtml(raw) = child {
            html.push_str(&raw);
        } else {
            projected.clear();
            project_node(child, inline, &mut projected);
            html.push_str(&serialize(&projected));
        }
    }
    tracing::trace!(context, len = html.len(), "Reparsing raw HTML run");
    parse_fragment(&html, context)
}

fn element(tag: &str, children: Vec<HtmlNode>) -> HtmlNode {
    HtmlNode::from(Element::new(tag).with_children(children))
}

fn project_node(node: Node, inline: bool, out: &mut Vec<HtmlNode>) {
    let html = match node {
        Node::Document(children) => {
            out.extend(project_children(children, "div", inline));
            return;
        }
        Node::Heading { level, children } => {
            let tag = format!("h{}", level.clamp(1, 6));
            let children = project_children(children, &tag, true);
            element(&tag, children)
        }
        Node::Paragraph(children) => element("p", project_children(children, "p", true)),
        Node::BlockQuote(children) => element(
            "blockquote",
            project_children(children, "blockquote", false),
        ),
        Node::List { start, children } => {
            let tag = if start.is_some() { "ol" } else { "ul" };
            let mut list = Element::new(tag).with_children(project_children(children, tag, false));
            if let Some(start) = start.filter(|&start| start != 1) {
                list = list.with_attr("start", start.to_string());
            }
            HtmlNode::from(list)
        }
        Node::ListItem(children) => element("li", project_children(children, "li", false)),
        Node::TaskListMarker(checked) => {
            let mut input = Element::new("input")
                .with_attr("type", "checkbox")
                .with_attr("disabled", "");
            if checked {
                input = input.with_attr("checked", "");
            }
            HtmlNode::from(input)
        }
        Node::Table {
            alignments,
            children,
        } => project_table(&alignments, children),
        Node::TableRow(children) => project_row(children, &[], "td"),
        Node::TableCell(children) => element("td", project_children(children, "td", true)),
        Node::CodeBlock { info, value } => {
            let mut code = Element::new("code").with_child(HtmlNode::Text(value));
            if let Some(lang) = info.as_deref().and_then(|info| info.split_whitespace().next()) {
                code = code.with_attr("class", format!("language-{lang}"));
            }
            element("pre", vec![HtmlNode::from(code)])
        }
        Node::InlineCode(value) => element("code", vec![HtmlNode::Text(value)]),
        Node::MathInline(value) => HtmlNode::from(
            Element::new("span")
                .with_attr("class", MATH_INLINE_CLASS)
                .with_child(HtmlNode::Text(value)),
        ),
        Node::MathBlock(value) => {
            let tag = if inline { "span" } else { "div" };
            HtmlNode::from(
                Element::new(tag)
                    .with_attr("class", MATH_DISPLAY_CLASS)
                    .with_child(HtmlNode::Text(value)),
            )
        }
        Node::Emphasis(children) => element("em", project_children(children, "em", true)),
        Node::Strong(children) => element("strong", project_children(children, "strong", true)),
        Node::Strikethrough(children) => element("del", project_children(children, "del", true)),
        Node::Link {
            url,
            title,
            children,
        } => {
            let mut link = Element::new("a")
                .with_attr("href", url)
                .with_children(project_children(children, "a", true));
            if !title.is_empty() {
                link = link.with_attr("title", title);
            }
            HtmlNode::from(link)
        }
        Node::Image { url, title, alt } => {
            let mut image = Element::new("img").with_attr("src", url).with_attr("alt", alt);
            if !title.is_empty() {
                image = image.with_attr("title", title);
            }
            HtmlNode::from(image)
        }
        Node::RawHtml(raw) => {
            let context = if inline { "span" } else { "div" };
            out.extend(parse_fragment(&raw, context));
            return;
        }
        Node::Text(text) => HtmlNode::Text(text),
        Node::SoftBreak => HtmlNode::text("\n"),
        Node::HardBreak => HtmlNode::from(Element::new("br")),
        Node::ThematicBreak => HtmlNode::from(Element::new("hr")),
    };
    out.push(html);
}

/// Header row in `thead`, remaining rows in `tbody`.
fn project_table(alignments: &[Alignment], rows: Vec<Node>) -> HtmlNode {
    let mut rows = rows.into_iter();
    let mut table = Element::new("table");

    if let Some(Node::TableRow(cells)) = rows.next() {
        table = table.with_child(element("thead", vec![project_row(cells, alignments, "th")]));
    }
    let body: Vec<HtmlNode> = rows
        .filter_map(|row| match row {
            Node::TableRow(cells) => Some(project_row(cells, alignments, "td")),
            _ => None,
        })
        .collect();
    if !body.is_empty() {
        table = table.with_child(element("tbody", body));
    }
    HtmlNode::from(table)
}

fn project_row(cells: Vec<Node>, alignments: &[Alignment], cell_tag: &str) -> HtmlNode {
    let cells = cells
        .into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let children = match cell {
                Node::TableCell(children) => children,
                other => vec![other],
            };
            let mut cell = Element::new(cell_tag)
                .with_children(project_children(children, cell_tag, true));
            if let Some(align) = alignments.get(index).and_then(|a| a.as_attr()) {
                cell = cell.with_attr("align", align);
            }
            HtmlNode::from(cell)
        })
        .collect();
    element("tr", cells)
}
