//! Markdown to sanitized HTML rendering.
//!
//! The pipeline has five stages, each in its own module:
//!
//! 1. [`parser`]: Markdown (CommonMark, GFM, `$` math) into an [`mdast::Node`] tree
//! 2. [`transform`]: math promotion, bare URL and email autolinks, diagram
//!    blocks, syntax highlighting (`syntax-highlighting` feature)
//! 3. [`projection`]: Markdown tree onto an HTML tree, raw HTML parsed in place
//! 4. sanitization with an allow-list [`SanitizationSchema`]
//! 5. serialization to a [`SafeHtml`] string
//!
//! [`Renderer`] ties the stages together around a shared, immutable schema.
//! The free [`render`] function uses a process-wide default renderer.
//!
//! # Example
//!
//! ```
//! let html = mdvis_renderer::render("**Hello** [world](javascript:alert(1))");
//! assert_eq!(html.as_str(), "<p><strong>Hello</strong> <a>world</a></p>");
//! ```

pub mod mdast;
pub mod parser;
pub mod projection;
mod renderer;
pub mod transform;
mod util;

pub use mdvis_sanitizer::{SanitizationSchema, SanitizeReport};
pub use renderer::{Renderer, SafeHtml, render};
