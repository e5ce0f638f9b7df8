//! The Markdown to safe HTML pipeline.

use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

use mdvis_html::serialize;
use mdvis_sanitizer::{SanitizationSchema, SanitizeReport, Sanitizer};

use crate::parser::{ParseOptions, parse};
use crate::projection::project;
use crate::transform::{TransformOptions, transform};

/// HTML that passed through the sanitizer.
///
/// Only [`Renderer::render`] constructs it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SafeHtml(String);

impl SafeHtml {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SafeHtml> for String {
    fn from(html: SafeHtml) -> Self {
        html.0
    }
}

/// Markdown renderer with a frozen sanitization schema.
///
/// Cheap to clone; clones share the schema. Rendering takes `&self`, so one
/// renderer can serve any number of threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use mdvis_renderer::Renderer;
/// use mdvis_sanitizer::SanitizationSchema;
///
/// let renderer = Renderer::new(Arc::new(SanitizationSchema::default())).with_math(false);
/// let html = renderer.render("costs $5 and $6");
/// assert_eq!(html.as_str(), "<p>costs $5 and $6</p>");
/// ```
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct Renderer {
    schema: Arc<SanitizationSchema>,
    gfm: bool,
    math: bool,
    diagrams: bool,
    highlight: bool,
}

impl Renderer {
    /// Create a renderer with every extension enabled.
    #[must_use]
    pub fn new(schema: Arc<SanitizationSchema>) -> Self {
        Self {
            schema,
            gfm: true,
            math: true,
            diagrams: true,
            highlight: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Bare URL and email autolinks
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable `$` math.
    #[must_use]
    pub fn with_math(mut self, enabled: bool) -> Self {
        self.math = enabled;
        self
    }

    /// Enable or disable diagram code block rewriting.
    #[must_use]
    pub fn with_diagrams(mut self, enabled: bool) -> Self {
        self.diagrams = enabled;
        self
    }

    /// Enable or disable syntax highlighting of fenced code.
    ///
    /// Only has an effect with the `syntax-highlighting` feature.
    #[must_use]
    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }

    #[must_use]
    pub fn schema(&self) -> &SanitizationSchema {
        &self.schema
    }

    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            gfm: self.gfm,
            math: self.math,
        }
    }

    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            math: self.math,
            diagrams: self.diagrams,
            autolinks: self.gfm,
            highlight: self.highlight,
        }
    }

    /// Render Markdown to sanitized HTML.
    ///
    /// Total: any input, including empty or malformed Markdown, yields a
    /// (possibly empty) HTML string.
    #[must_use]
    pub fn render(&self, markdown: &str) -> SafeHtml {
        self.render_with_report(markdown).0
    }

    /// Render Markdown and report what the sanitizer removed.
    #[must_use]
    pub fn render_with_report(&self, markdown: &str) -> (SafeHtml, SanitizeReport) {
        let started = Instant::now();

        let document = parse(markdown, self.parse_options());
        let document = transform(document, self.transform_options());
        let nodes = project(document);
        let (nodes, report) = Sanitizer::new(&self.schema).sanitize_with_report(nodes);
        let html = serialize(&nodes);

        tracing::debug!(
            input_len = markdown.len(),
            output_len = html.len(),
            elapsed_us = started.elapsed().as_micros(),
            "Rendered markdown"
        );
        (SafeHtml(html), report)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Arc::new(SanitizationSchema::default()))
    }
}

static DEFAULT_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::default);

/// Render Markdown with the default schema and every extension enabled.
///
/// # Examples
///
/// ```
/// let html = mdvis_renderer::render("# Hi <script>alert(1)</script>");
/// assert_eq!(html.as_str(), "<h1>Hi </h1>");
/// ```
#[must_use]
pub fn render(markdown: &str) -> SafeHtml {
    DEFAULT_RENDERER.render(markdown)
}
