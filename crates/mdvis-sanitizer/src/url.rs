//! URL scheme policy for URL-valued attributes.

use std::collections::HashSet;

/// Scheme of a URL attribute value, if it has one.
///
/// A colon only introduces a scheme when it appears before any `/`, `?` or
/// `#`; otherwise the value is a relative reference (`a/b:c`, `?q=a:b`,
/// `#x:y`). The scheme is returned lowercased.
fn scheme(value: &str) -> Option<String> {
    let colon = value.find(':')?;
    let delimiter = value.find(['/', '?', '#']);
    if delimiter.is_some_and(|position| position < colon) {
        return None;
    }
    Some(value[..colon].to_ascii_lowercase())
}

/// MIME type of a `data:` URL body (`image/png;base64,...` -> `image/png`).
fn data_mime(body: &str) -> String {
    let end = body.find([';', ',']).unwrap_or(body.len());
    body[..end].trim().to_ascii_lowercase()
}

/// Decide whether a URL attribute value may be kept.
///
/// Relative and fragment-only URLs are always allowed. Absolute URLs need a
/// scheme from `schemes`; `data:` URLs additionally need `allow_data` to
/// accept their MIME type. Anything unrecognised is rejected.
pub(crate) fn is_allowed(
    value: &str,
    schemes: &HashSet<String>,
    allow_data: Option<&dyn Fn(&str) -> bool>,
) -> bool {
    match scheme(value) {
        None => true,
        Some(scheme) if scheme == "data" => allow_data.is_some_and(|allow| {
            let body = &value["data:".len()..];
            allow(&data_mime(body))
        }),
        Some(scheme) => schemes.contains(&scheme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web() -> HashSet<String> {
        ["http", "https", "mailto"]
            .iter()
            .map(|&s| s.to_owned())
            .collect()
    }

    fn png_only(mime: &str) -> bool {
        mime == "image/png"
    }

    #[test]
    fn test_relative_urls_allowed() {
        for url in ["page.html", "./a/b", "/abs/path", "#section", "?q=1", "", "a/b:c"] {
            assert!(is_allowed(url, &web(), None), "{url} should be allowed");
        }
    }

    #[test]
    fn test_allowed_schemes() {
        assert!(is_allowed("https://example.com", &web(), None));
        assert!(is_allowed("HTTP://EXAMPLE.COM", &web(), None));
        assert!(is_allowed("mailto:someone@example.com", &web(), None));
    }

    #[test]
    fn test_script_schemes_rejected() {
        for url in [
            "javascript:alert(1)",
            "JaVaScRiPt:alert(1)",
            " javascript:alert(1)",
            "java\tscript:alert(1)",
            "vbscript:msgbox(1)",
            "ftp://example.com",
        ] {
            assert!(!is_allowed(url, &web(), None), "{url:?} should be rejected");
        }
    }

    #[test]
    fn test_data_urls() {
        let png = "data:image/png;base64,iVBORw0KGgo=";
        let svg = "data:image/svg+xml;base64,PHN2Zz4=";
        let html = "data:text/html,<script>alert(1)</script>";

        assert!(!is_allowed(png, &web(), None));
        assert!(is_allowed(png, &web(), Some(&png_only)));
        assert!(!is_allowed(svg, &web(), Some(&png_only)));
        assert!(!is_allowed(html, &web(), Some(&png_only)));
    }

    #[test]
    fn test_data_url_uppercase_scheme() {
        assert!(is_allowed(
            "DATA:IMAGE/PNG,abc",
            &web(),
            Some(&png_only)
        ));
    }
}
