//! Sanitization schema and its startup-time merge step.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::defaults::{
    BASE_ATTRIBUTES, BASE_CLOBBER, BASE_DATA_IMAGE_TYPES, BASE_FORCED_ATTRIBUTES,
    BASE_GLOBAL_ATTRIBUTES, BASE_PROTOCOLS, BASE_REQUIRED_VALUES, BASE_STRIP, BASE_TAGS,
    CLOBBER_PREFIX, FORBIDDEN_ATTRIBUTES, FORBIDDEN_SCHEMES, FORBIDDEN_TAGS, MATH_TAGS,
    RENDERING_ATTRIBUTES, SVG_TAGS,
};

/// Error raised when a schema extension would weaken the security boundary.
///
/// These are configuration errors: they surface while the schema is built at
/// startup and never during rendering.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The extension allows a tag that can execute or load active content.
    #[error("tag <{0}> cannot be allowed")]
    ForbiddenTag(String),
    /// The extension allows an event handler or otherwise active attribute.
    #[error("attribute `{0}` cannot be allowed")]
    ForbiddenAttribute(String),
    /// The extension allows a script-capable URL scheme.
    #[error("URL scheme `{scheme}` cannot be allowed for `{attribute}`")]
    ForbiddenScheme {
        /// URL-valued attribute the scheme was added to.
        attribute: String,
        /// Rejected scheme.
        scheme: String,
    },
    /// The extension allows a `data:` MIME type that is not a raster image.
    #[error("data URL type `{0}` cannot be allowed (only raster image/* types)")]
    ForbiddenDataType(String),
}

/// Additions merged into a [`SanitizationSchema`].
///
/// Merging is a union: tag sets, per-tag attribute sets, the global attribute
/// set, per-attribute scheme sets, `data:` image types and the strip set are
/// each combined with the base. Names are matched case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SchemaExtension {
    /// Additional allowed tags.
    pub tags: Vec<String>,
    /// Additional allowed attributes per tag.
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Additional attributes allowed on every tag.
    pub global_attributes: Vec<String>,
    /// Additional allowed schemes per URL-valued attribute.
    pub protocols: BTreeMap<String, Vec<String>>,
    /// Additional MIME types allowed in `data:` URLs on `img[src]`.
    pub data_image_types: Vec<String>,
    /// Additional tags removed together with their content.
    pub strip: Vec<String>,
}

impl SchemaExtension {
    /// Extension for the output of downstream math and diagram renderers.
    ///
    /// Adds the MathML and SVG elements (with their presentational
    /// attributes) that KaTeX-style and Mermaid-style renderers emit.
    #[must_use]
    pub fn rendering() -> Self {
        Self {
            tags: MATH_TAGS
                .iter()
                .chain(SVG_TAGS)
                .map(|&tag| tag.to_owned())
                .collect(),
            attributes: to_owned_map(RENDERING_ATTRIBUTES),
            ..Self::default()
        }
    }

    /// Check that the extension does not allow active content.
    ///
    /// # Errors
    ///
    /// Returns the first forbidden tag, attribute, scheme or data type found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for tag in self.tags.iter().chain(self.attributes.keys()) {
            let tag = tag.to_ascii_lowercase();
            if FORBIDDEN_TAGS.contains(&tag.as_str()) {
                return Err(SchemaError::ForbiddenTag(tag));
            }
        }

        let attributes = self
            .attributes
            .values()
            .flatten()
            .chain(&self.global_attributes)
            .chain(self.protocols.keys());
        for attribute in attributes {
            let attribute = attribute.to_ascii_lowercase();
            if is_forbidden_attribute(&attribute) {
                return Err(SchemaError::ForbiddenAttribute(attribute));
            }
        }

        for (attribute, schemes) in &self.protocols {
            for scheme in schemes {
                let scheme = scheme.to_ascii_lowercase();
                if FORBIDDEN_SCHEMES.contains(&scheme.as_str()) {
                    return Err(SchemaError::ForbiddenScheme {
                        attribute: attribute.to_ascii_lowercase(),
                        scheme,
                    });
                }
            }
        }

        for mime in &self.data_image_types {
            let mime = mime.to_ascii_lowercase();
            if !mime.starts_with("image/") || mime.contains("svg") {
                return Err(SchemaError::ForbiddenDataType(mime));
            }
        }

        Ok(())
    }
}

fn is_forbidden_attribute(name: &str) -> bool {
    name.starts_with("on") || FORBIDDEN_ATTRIBUTES.contains(&name)
}

fn to_value_map(
    entries: &[(&str, &[(&str, &str)])],
) -> HashMap<String, BTreeMap<String, String>> {
    entries
        .iter()
        .map(|(tag, values)| {
            let values = values
                .iter()
                .map(|&(name, value)| (name.to_owned(), value.to_owned()))
                .collect();
            ((*tag).to_owned(), values)
        })
        .collect()
}

fn to_owned_map(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, values)| {
            (
                (*key).to_owned(),
                values.iter().map(|&v| v.to_owned()).collect(),
            )
        })
        .collect()
}

/// Immutable allow-list consumed by the [`Sanitizer`](crate::Sanitizer).
///
/// Build it once at startup (base schema plus extensions), then share it by
/// reference or behind an `Arc`. There is no way to mutate a schema in place
/// after construction other than consuming it through [`extend`](Self::extend).
///
/// Required and forced attribute values are fixed by the base schema;
/// extensions can only widen the allow-lists.
#[derive(Clone, Debug)]
pub struct SanitizationSchema {
    tags: HashSet<String>,
    required_values: HashMap<String, BTreeMap<String, String>>,
    forced_attributes: HashMap<String, BTreeMap<String, String>>,
    attributes: HashMap<String, HashSet<String>>,
    global_attributes: HashSet<String>,
    protocols: HashMap<String, HashSet<String>>,
    data_image_types: HashSet<String>,
    strip: HashSet<String>,
    clobber: HashSet<String>,
    clobber_prefix: String,
}

impl SanitizationSchema {
    /// GitHub-style base schema without the math and SVG vocabulary.
    #[must_use]
    pub fn github() -> Self {
        let mut schema = Self {
            tags: HashSet::new(),
            required_values: to_value_map(BASE_REQUIRED_VALUES),
            forced_attributes: to_value_map(BASE_FORCED_ATTRIBUTES),
            attributes: HashMap::new(),
            global_attributes: HashSet::new(),
            protocols: HashMap::new(),
            data_image_types: HashSet::new(),
            strip: HashSet::new(),
            clobber: BASE_CLOBBER.iter().map(|&name| name.to_owned()).collect(),
            clobber_prefix: CLOBBER_PREFIX.to_owned(),
        };
        schema.merge(&SchemaExtension {
            tags: BASE_TAGS.iter().map(|&tag| tag.to_owned()).collect(),
            attributes: to_owned_map(BASE_ATTRIBUTES),
            global_attributes: BASE_GLOBAL_ATTRIBUTES
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
            protocols: to_owned_map(BASE_PROTOCOLS),
            data_image_types: BASE_DATA_IMAGE_TYPES
                .iter()
                .map(|&mime| mime.to_owned())
                .collect(),
            strip: BASE_STRIP.iter().map(|&tag| tag.to_owned()).collect(),
        });
        schema
    }

    /// Merge a validated extension into this schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the extension would allow active content;
    /// the schema is consumed either way.
    pub fn extend(mut self, extension: &SchemaExtension) -> Result<Self, SchemaError> {
        extension.validate()?;
        self.merge(extension);
        Ok(self)
    }

    fn merge(&mut self, extension: &SchemaExtension) {
        self.tags
            .extend(extension.tags.iter().map(|tag| tag.to_ascii_lowercase()));
        for (tag, names) in &extension.attributes {
            self.attributes
                .entry(tag.to_ascii_lowercase())
                .or_default()
                .extend(names.iter().map(|name| name.to_ascii_lowercase()));
        }
        self.global_attributes.extend(
            extension
                .global_attributes
                .iter()
                .map(|name| name.to_ascii_lowercase()),
        );
        for (attribute, schemes) in &extension.protocols {
            self.protocols
                .entry(attribute.to_ascii_lowercase())
                .or_default()
                .extend(schemes.iter().map(|scheme| scheme.to_ascii_lowercase()));
        }
        self.data_image_types.extend(
            extension
                .data_image_types
                .iter()
                .map(|mime| mime.to_ascii_lowercase()),
        );
        self.strip
            .extend(extension.strip.iter().map(|tag| tag.to_ascii_lowercase()));
    }

    /// Whether elements with this (lowercase) tag are kept.
    #[must_use]
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether this (lowercase) attribute is kept on this (lowercase) tag.
    #[must_use]
    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        self.global_attributes.contains(attribute)
            || self
                .attributes
                .get(tag)
                .is_some_and(|names| names.contains(attribute))
    }

    /// Attribute values this (lowercase) tag must carry to be kept.
    ///
    /// Values compare case-insensitively; an element missing any of them is
    /// removed.
    #[must_use]
    pub fn required_values(&self, tag: &str) -> Option<&BTreeMap<String, String>> {
        self.required_values.get(tag)
    }

    /// Attribute values set on every kept element with this (lowercase) tag.
    #[must_use]
    pub fn forced_attributes(&self, tag: &str) -> Option<&BTreeMap<String, String>> {
        self.forced_attributes.get(tag)
    }

    /// Allowed schemes if this attribute is URL-valued.
    #[must_use]
    pub fn protocols(&self, attribute: &str) -> Option<&HashSet<String>> {
        self.protocols.get(attribute)
    }

    /// Whether a `data:` URL of this MIME type may appear in `img[src]`.
    #[must_use]
    pub fn allows_data_image(&self, mime: &str) -> bool {
        self.data_image_types.contains(mime)
    }

    /// Whether disallowed elements with this tag lose their content too.
    #[must_use]
    pub fn strips(&self, tag: &str) -> bool {
        self.strip.contains(tag)
    }

    /// Prefix to apply if this attribute's values can clobber DOM globals.
    #[must_use]
    pub fn clobber_prefix(&self, attribute: &str) -> Option<&str> {
        self.clobber
            .contains(attribute)
            .then_some(self.clobber_prefix.as_str())
    }

    /// Allowed tags in sorted order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for SanitizationSchema {
    /// Base schema merged with [`SchemaExtension::rendering`].
    fn default() -> Self {
        let mut schema = Self::github();
        schema.merge(&SchemaExtension::rendering());
        schema
    }
}
