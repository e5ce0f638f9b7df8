//! Syntax tree rewrites applied between parsing and HTML projection.
//!
//! Each pass walks the tree once and edits it in place. Passes run in a
//! fixed order: math, autolinks, diagrams, highlighting. Diagram rewriting
//! and highlighting have to happen before projection because they replace
//! code blocks with raw HTML.

mod autolink;
mod diagram;
#[cfg(feature = "syntax-highlighting")]
mod highlight;
mod math;

pub use diagram::{DIAGRAM_CLASS, DIAGRAM_LANGUAGE, diagram_html};
#[cfg(feature = "syntax-highlighting")]
pub use highlight::HIGHLIGHT_CLASS_PREFIX;

use crate::mdast::Node;

/// Which transform passes run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TransformOptions {
    /// Promote display math; when off, math tokens revert to literal text.
    pub math: bool,
    /// Rewrite diagram code blocks into diagram containers.
    pub diagrams: bool,
    /// Link bare `http(s)://` and `www.` URLs and email addresses in text.
    pub autolinks: bool,
    /// Highlight fenced code with a known language. Needs the
    /// `syntax-highlighting` feature; ignored without it.
    pub highlight: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            math: true,
            diagrams: true,
            autolinks: true,
            highlight: true,
        }
    }
}

/// Run the enabled passes over a document.
///
/// # Examples
///
/// ```
/// use mdvis_renderer::mdast::Node;
/// use mdvis_renderer::transform::{TransformOptions, transform};
///
/// let doc = Node::Document(vec![Node::CodeBlock {
///     info: Some("mermaid".to_owned()),
///     value: "A-->B\n".to_owned(),
/// }]);
/// let doc = transform(doc, TransformOptions::default());
/// assert_eq!(
///     doc,
///     Node::Document(vec![Node::RawHtml(
///         "<pre class=\"mermaid\">A--&gt;B\n</pre>".to_owned()
///     )])
/// );
/// ```
#[must_use]
pub fn transform(mut document: Node, options: TransformOptions) -> Node {
    if options.math {
        math::promote_display_math(&mut document);
    } else {
        math::literalize_math(&mut document);
    }
    if options.autolinks {
        autolink::link_bare_urls(&mut document);
    }
    if options.diagrams {
        diagram::rewrite_diagrams(&mut document);
    }
    #[cfg(feature = "syntax-highlighting")]
    if options.highlight {
        highlight::highlight_code_blocks(&mut document);
    }
    document
}
