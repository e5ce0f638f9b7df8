//! HTML syntax tree for the mdvis rendering pipeline.
//!
//! The renderer projects Markdown into [`HtmlNode`] trees, the sanitizer
//! filters them, and [`serialize`] turns them back into text. Raw HTML
//! fragments coming from Markdown are parsed into the same tree type with
//! [`parse_fragment`] so that nothing reaches the output unexamined.
//!
//! # Example
//!
//! ```
//! use mdvis_html::{Element, HtmlNode, parse_fragment, serialize};
//!
//! let nodes = parse_fragment("<p>a &amp; b</p>", "div");
//! assert_eq!(
//!     nodes,
//!     vec![HtmlNode::from(Element::new("p").with_child(HtmlNode::text("a & b")))]
//! );
//! assert_eq!(serialize(&nodes), "<p>a &amp; b</p>");
//! ```

mod escape;
mod node;
mod parser;
mod serializer;

pub use escape::{escape_attr, escape_text};
pub use node::{Element, HtmlNode, VOID_ELEMENTS};
pub use parser::{MAX_NESTING_DEPTH, parse_fragment};
pub use serializer::serialize;
