//! Entity escaping for HTML text and attribute values.

/// Escape text content (`&`, `<`, `>`).
///
/// # Examples
///
/// ```
/// use mdvis_html::escape_text;
///
/// assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
/// ```
pub fn escape_text(text: &str) -> String {
    escape(text, false)
}

/// Escape an attribute value (`&`, `<`, `>`, `"`).
///
/// # Examples
///
/// ```
/// use mdvis_html::escape_attr;
///
/// assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
/// ```
pub fn escape_attr(value: &str) -> String {
    escape(value, true)
}

fn escape(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
