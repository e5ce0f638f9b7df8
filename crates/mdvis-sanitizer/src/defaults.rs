//! Built-in allow-lists.
//!
//! The base lists follow GitHub's comment sanitizer, expressed with HTML
//! attribute names. The rendering lists add the MathML and SVG vocabulary
//! produced by downstream math and diagram renderers.

/// Tags allowed by the base schema.
pub(crate) const BASE_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "dd", "del", "details", "div", "dl", "dt", "em", "h1",
    "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "input", "ins", "kbd", "li", "ol", "p",
    "picture", "pre", "q", "rp", "rt", "ruby", "s", "samp", "section", "source", "span", "strike",
    "strong", "sub", "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "tt",
    "ul", "var",
];

/// Per-tag attributes allowed by the base schema.
pub(crate) const BASE_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href"]),
    ("blockquote", &["cite"]),
    ("code", &["class"]),
    ("del", &["cite"]),
    ("div", &["class", "itemscope", "itemtype"]),
    ("img", &["src", "longdesc"]),
    ("input", &["type", "disabled", "checked"]),
    ("ins", &["cite"]),
    ("li", &["class"]),
    ("ol", &["class"]),
    ("pre", &["class"]),
    ("q", &["cite"]),
    ("source", &["srcset"]),
    ("span", &["class"]),
    ("ul", &["class"]),
];

/// Attribute values an element must carry to be kept at all.
///
/// Only checkbox inputs (task list markers) survive; text and password
/// fields are removed.
pub(crate) const BASE_REQUIRED_VALUES: &[(&str, &[(&str, &str)])] =
    &[("input", &[("type", "checkbox")])];

/// Attribute values set on every kept element, replacing what was there.
pub(crate) const BASE_FORCED_ATTRIBUTES: &[(&str, &[(&str, &str)])] =
    &[("input", &[("disabled", "")])];

/// Attributes allowed on every tag by the base schema.
pub(crate) const BASE_GLOBAL_ATTRIBUTES: &[&str] = &[
    "abbr",
    "accept",
    "accept-charset",
    "accesskey",
    "align",
    "alt",
    "axis",
    "border",
    "cellpadding",
    "cellspacing",
    "char",
    "charoff",
    "charset",
    "checked",
    "clear",
    "colspan",
    "color",
    "cols",
    "compact",
    "coords",
    "datetime",
    "dir",
    "frame",
    "headers",
    "height",
    "hreflang",
    "hspace",
    "id",
    "ismap",
    "itemprop",
    "label",
    "lang",
    "maxlength",
    "media",
    "multiple",
    "name",
    "nohref",
    "noshade",
    "nowrap",
    "open",
    "prompt",
    "readonly",
    "rev",
    "rowspan",
    "rows",
    "rules",
    "scope",
    "selected",
    "shape",
    "size",
    "span",
    "start",
    "summary",
    "tabindex",
    "title",
    "usemap",
    "valign",
    "value",
    "width",
];

/// URL-valued attributes and the schemes they accept.
pub(crate) const BASE_PROTOCOLS: &[(&str, &[&str])] = &[
    ("cite", &["http", "https"]),
    ("href", &["http", "https", "mailto"]),
    ("longdesc", &["http", "https"]),
    ("src", &["http", "https"]),
];

/// MIME types accepted in `data:` URLs on `img[src]`.
pub(crate) const BASE_DATA_IMAGE_TYPES: &[&str] =
    &["image/gif", "image/jpeg", "image/png", "image/webp"];

/// Tags removed together with their content.
pub(crate) const BASE_STRIP: &[&str] = &[
    "iframe",
    "embed",
    "noembed",
    "noframes",
    "noscript",
    "object",
    "plaintext",
    "script",
    "style",
    "template",
    "textarea",
    "title",
    "xmp",
];

/// Attributes whose values get the clobber prefix.
pub(crate) const BASE_CLOBBER: &[&str] = &["id", "name"];

/// Prefix applied to clobber-prone attribute values.
pub(crate) const CLOBBER_PREFIX: &str = "user-content-";

/// MathML tags emitted by math renderers.
pub(crate) const MATH_TAGS: &[&str] = &[
    "math",
    "annotation",
    "semantics",
    "mrow",
    "mi",
    "mn",
    "mo",
    "mfrac",
    "msup",
    "msub",
    "mtext",
];

/// SVG tags emitted by diagram renderers.
pub(crate) const SVG_TAGS: &[&str] = &[
    "svg", "g", "path", "rect", "circle", "text", "line", "polygon", "defs", "marker",
];

/// SVG tag names whose mixed case survives sanitization.
///
/// HTML parsing lowercases everything else; these keep the spelling the
/// HTML parser gives them inside `<svg>`.
pub(crate) const SVG_CASE_ADJUSTED_TAGS: &[&str] = &[
    "altGlyph",
    "altGlyphDef",
    "altGlyphItem",
    "animateColor",
    "animateMotion",
    "animateTransform",
    "clipPath",
    "feBlend",
    "feColorMatrix",
    "feComponentTransfer",
    "feComposite",
    "feConvolveMatrix",
    "feDiffuseLighting",
    "feDisplacementMap",
    "feDistantLight",
    "feDropShadow",
    "feFlood",
    "feFuncA",
    "feFuncB",
    "feFuncG",
    "feFuncR",
    "feGaussianBlur",
    "feImage",
    "feMerge",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpecularLighting",
    "feSpotLight",
    "feTile",
    "feTurbulence",
    "foreignObject",
    "glyphRef",
    "linearGradient",
    "radialGradient",
    "textPath",
];

/// Per-tag attributes for the MathML and SVG vocabulary.
pub(crate) const RENDERING_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("annotation", &["encoding"]),
    ("math", &["xmlns"]),
    ("svg", &["class", "viewbox", "width", "height", "xmlns"]),
    ("path", &["d", "fill", "stroke", "stroke-width", "class"]),
    ("g", &["class", "transform"]),
    ("rect", &["x", "y", "width", "height", "fill", "stroke", "class"]),
    ("circle", &["cx", "cy", "r", "fill", "stroke", "class"]),
    (
        "text",
        &["x", "y", "class", "text-anchor", "dominant-baseline"],
    ),
    (
        "line",
        &["x1", "y1", "x2", "y2", "stroke", "stroke-width", "class"],
    ),
    ("polygon", &["points", "fill", "stroke", "class"]),
];

/// Tags no schema may allow.
pub(crate) const FORBIDDEN_TAGS: &[&str] = &[
    "base", "embed", "frame", "frameset", "iframe", "link", "meta", "object", "script", "style",
];

/// Attributes no schema may allow (in addition to every `on*` handler).
pub(crate) const FORBIDDEN_ATTRIBUTES: &[&str] = &["formaction", "srcdoc", "style"];

/// Schemes no URL attribute may accept.
pub(crate) const FORBIDDEN_SCHEMES: &[&str] = &["data", "javascript", "vbscript"];
