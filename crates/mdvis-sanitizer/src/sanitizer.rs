//! Allow-list sanitizer over [`HtmlNode`] fragments.

use std::collections::BTreeMap;

use mdvis_html::{Element, HtmlNode};

use crate::defaults::SVG_CASE_ADJUSTED_TAGS;
use crate::schema::SanitizationSchema;
use crate::url;

/// Sanitize a fragment with the given schema.
///
/// Shorthand for `Sanitizer::new(schema).sanitize(nodes)`.
pub fn sanitize(nodes: Vec<HtmlNode>, schema: &SanitizationSchema) -> Vec<HtmlNode> {
    Sanitizer::new(schema).sanitize(nodes)
}

/// What a sanitizer pass removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Elements removed together with their content.
    pub removed_elements: usize,
    /// Disallowed elements replaced by their children.
    pub unwrapped_elements: usize,
    /// Attributes not allowed on their element.
    pub removed_attributes: usize,
    /// URL attributes with a disallowed scheme or `data:` type.
    pub removed_urls: usize,
    /// HTML comments.
    pub removed_comments: usize,
}

impl SanitizeReport {
    /// Whether nothing was removed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Schema-driven HTML sanitizer.
///
/// Borrows an immutable [`SanitizationSchema`]; any number of sanitizers can
/// run concurrently over the same schema.
#[derive(Clone, Copy, Debug)]
pub struct Sanitizer<'a> {
    schema: &'a SanitizationSchema,
}

impl<'a> Sanitizer<'a> {
    /// Create a sanitizer for the given schema.
    #[must_use]
    pub fn new(schema: &'a SanitizationSchema) -> Self {
        Self { schema }
    }

    /// Sanitize a fragment.
    ///
    /// Children are sanitized before their parent decides whether to keep,
    /// unwrap or strip itself. An empty result means there is nothing left
    /// to render.
    pub fn sanitize(&self, nodes: Vec<HtmlNode>) -> Vec<HtmlNode> {
        self.sanitize_with_report(nodes).0
    }

    /// Sanitize a fragment and count what was removed.
    pub fn sanitize_with_report(&self, nodes: Vec<HtmlNode>) -> (Vec<HtmlNode>, SanitizeReport) {
        let mut report = SanitizeReport::default();
        let nodes = self.sanitize_nodes(nodes, &mut report);
        (nodes, report)
    }

    fn sanitize_nodes(&self, nodes: Vec<HtmlNode>, report: &mut SanitizeReport) -> Vec<HtmlNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                HtmlNode::Text(text) => out.push(HtmlNode::Text(text)),
                HtmlNode::Comment(_) => {
                    tracing::debug!("Removed comment");
                    report.removed_comments += 1;
                }
                HtmlNode::Element(element) => self.sanitize_element(element, &mut out, report),
            }
        }
        out
    }

    fn sanitize_element(
        &self,
        element: Element,
        out: &mut Vec<HtmlNode>,
        report: &mut SanitizeReport,
    ) {
        let Element {
            tag,
            attrs,
            children,
        } = element;
        let key = tag.to_ascii_lowercase();

        if !self.schema.allows_tag(&key) {
            if self.schema.strips(&key) {
                tracing::debug!(tag = %key, "Removed element with its content");
                report.removed_elements += 1;
            } else {
                tracing::debug!(tag = %key, "Unwrapped disallowed element");
                report.unwrapped_elements += 1;
                out.extend(self.sanitize_nodes(children, report));
            }
            return;
        }

        if !self.has_required_values(&key, &attrs) {
            tracing::debug!(tag = %key, "Removed element without required attribute values");
            report.removed_elements += 1;
            return;
        }

        let children = self.sanitize_nodes(children, report);
        let mut attrs = self.sanitize_attrs(&key, attrs, report);
        if let Some(forced) = self.schema.forced_attributes(&key) {
            for (name, value) in forced {
                attrs.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
                attrs.insert(name.clone(), value.clone());
            }
        }
        out.push(HtmlNode::Element(Element {
            tag: output_tag(key),
            attrs,
            children,
        }));
    }

    fn has_required_values(&self, tag: &str, attrs: &BTreeMap<String, String>) -> bool {
        let Some(required) = self.schema.required_values(tag) else {
            return true;
        };
        required.iter().all(|(name, expected)| {
            attrs.iter().any(|(existing, value)| {
                existing.eq_ignore_ascii_case(name) && value.trim().eq_ignore_ascii_case(expected)
            })
        })
    }

    fn sanitize_attrs(
        &self,
        tag: &str,
        attrs: BTreeMap<String, String>,
        report: &mut SanitizeReport,
    ) -> BTreeMap<String, String> {
        attrs
            .into_iter()
            .filter_map(|(name, value)| {
                let key = name.to_ascii_lowercase();
                if !self.schema.allows_attribute(tag, &key) {
                    tracing::debug!(tag, attribute = %key, "Removed disallowed attribute");
                    report.removed_attributes += 1;
                    return None;
                }

                if let Some(schemes) = self.schema.protocols(&key) {
                    let allow_data = |mime: &str| self.schema.allows_data_image(mime);
                    let data = (tag == "img" && key == "src")
                        .then_some(&allow_data as &dyn Fn(&str) -> bool);
                    if !url::is_allowed(&value, schemes, data) {
                        tracing::debug!(tag, attribute = %key, "Removed unsafe URL");
                        report.removed_urls += 1;
                        return None;
                    }
                }

                let value = match self.schema.clobber_prefix(&key) {
                    Some(prefix) if !value.starts_with(prefix) => format!("{prefix}{value}"),
                    _ => value,
                };
                Some((name, value))
            })
            .collect()
    }
}

/// Lowercase tag name, or the mixed-case SVG spelling for case-adjusted names.
fn output_tag(key: String) -> String {
    SVG_CASE_ADJUSTED_TAGS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(&key))
        .map_or(key, |&name| name.to_owned())
}
