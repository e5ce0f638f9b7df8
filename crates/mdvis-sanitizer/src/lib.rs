//! Allow-list HTML sanitizer for mdvis.
//!
//! The sanitizer is the security boundary of the rendering pipeline. It
//! walks an [`HtmlNode`](mdvis_html::HtmlNode) fragment and keeps only what a
//! [`SanitizationSchema`] explicitly permits:
//!
//! - Elements whose tag is not allowed are unwrapped (their sanitized
//!   children take their place), except for tags in the schema's strip set
//!   such as `script`, which are removed together with their content.
//! - Attributes not allowed for the element (or globally) are removed.
//! - URL attributes keep their value only for allowed schemes or relative URLs.
//! - Elements missing required attribute values (any `input` that is not a
//!   checkbox) are removed; forced values (`disabled` on inputs) are set.
//! - Comments are always removed.
//!
//! Sanitizing is pure, total and idempotent.
//!
//! # Example
//!
//! ```
//! use mdvis_html::{parse_fragment, serialize};
//! use mdvis_sanitizer::{SanitizationSchema, Sanitizer};
//!
//! let schema = SanitizationSchema::default();
//! let dirty = parse_fragment(
//!     r#"<p onclick="steal()">Hi<script>alert(1)</script> <a href="javascript:x">there</a></p>"#,
//!     "div",
//! );
//! let clean = Sanitizer::new(&schema).sanitize(dirty);
//! assert_eq!(serialize(&clean), "<p>Hi <a>there</a></p>");
//! ```

mod defaults;
mod sanitizer;
mod schema;
mod url;

pub use sanitizer::{SanitizeReport, Sanitizer, sanitize};
pub use schema::{SanitizationSchema, SchemaError, SchemaExtension};
