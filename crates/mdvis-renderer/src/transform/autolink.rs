//! Extended autolinks: bare `http://`, `https://` and `www.` URLs and email
//! addresses in text.

use std::sync::LazyLock;

use regex::Regex;

use crate::mdast::Node;

static BARE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?P<url>\b(?:https?://|www\.)[^\s<]+)|(?P<email>[a-z0-9._+-]+@[a-z0-9_-]+(?:\.[a-z0-9_-]+)+)",
    )
    .expect("invalid bare link regex")
});

/// Characters dropped from the end of a candidate URL.
const TRAILING_PUNCTUATION: &[char] = &['?', '!', '.', ',', ':', '*', '_', '~', '\'', '"'];

pub(super) fn link_bare_urls(node: &mut Node) {
    if matches!(node, Node::Link { .. }) {
        return;
    }
    let Some(children) = node.children_mut() else {
        return;
    };

    let mut out = Vec::with_capacity(children.len());
    let mut inside_anchor = false;
    for child in children.drain(..) {
        match child {
            Node::Text(text) if !inside_anchor => split_urls(&text, &mut out),
            Node::RawHtml(html) => {
                inside_anchor = anchor_state(&html).unwrap_or(inside_anchor);
                out.push(Node::RawHtml(html));
            }
            mut other => {
                link_bare_urls(&mut other);
                out.push(other);
            }
        }
    }
    *children = out;
}

/// Whether raw HTML opens (`Some(true)`) or closes (`Some(false)`) an anchor.
fn anchor_state(html: &str) -> Option<bool> {
    let lower = html.trim_start().to_ascii_lowercase();
    if lower.starts_with("</a") {
        Some(false)
    } else if lower.starts_with("<a ") || lower.starts_with("<a>") {
        Some(true)
    } else {
        None
    }
}

fn split_urls(text: &str, out: &mut Vec<Node>) {
    let mut last = 0;
    for captures in BARE_LINK.captures_iter(text) {
        let (start, label, url) = if let Some(found) = captures.name("url") {
            let candidate = trim_url(found.as_str());
            if !has_host(candidate) {
                continue;
            }
            let url = if candidate.to_ascii_lowercase().starts_with("www.") {
                format!("http://{candidate}")
            } else {
                candidate.to_owned()
            };
            (found.start(), candidate, url)
        } else if let Some(found) = captures.name("email") {
            let address = found.as_str();
            if !is_email(text, found.start(), address) {
                continue;
            }
            (found.start(), address, format!("mailto:{address}"))
        } else {
            continue;
        };

        if start > last {
            out.push(Node::Text(text[last..start].to_owned()));
        }
        out.push(Node::Link {
            url,
            title: String::new(),
            children: vec![Node::Text(label.to_owned())],
        });
        last = start + label.len();
    }
    if last < text.len() {
        out.push(Node::Text(text[last..].to_owned()));
    }
}

/// An address ending in `-` or `_`, or glued to a preceding `/`, is not linked.
fn is_email(text: &str, start: usize, address: &str) -> bool {
    !address.ends_with(['-', '_']) && !text[..start].ends_with(['/', ':'])
}

/// Drop trailing punctuation and unbalanced closing parentheses.
fn trim_url(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        if let Some(stripped) = url.strip_suffix(TRAILING_PUNCTUATION) {
            url = stripped;
        } else if url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
            url = &url[..url.len() - 1];
        } else {
            return url;
        }
    }
}

fn has_host(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let rest = ["https://", "http://", "www."]
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .unwrap_or(lower.as_str());
    rest.chars().next().is_some_and(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(value: &str) -> Node {
        Node::Text(value.to_owned())
    }

    fn link(url: &str, label: &str) -> Node {
        Node::Link {
            url: url.to_owned(),
            title: String::new(),
            children: vec![text(label)],
        }
    }

    fn linked(value: &str) -> Vec<Node> {
        let mut doc = Node::Paragraph(vec![text(value)]);
        link_bare_urls(&mut doc);
        match doc {
            Node::Paragraph(children) => children,
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_links_https_url() {
        assert_eq!(
            linked("see https://example.com/a?b=1 now"),
            vec![
                text("see "),
                link("https://example.com/a?b=1", "https://example.com/a?b=1"),
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_links_www_with_http_prefix() {
        assert_eq!(
            linked("www.example.com"),
            vec![link("http://www.example.com", "www.example.com")]
        );
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        assert_eq!(
            linked("Visit https://example.com."),
            vec![
                text("Visit "),
                link("https://example.com", "https://example.com"),
                text("."),
            ]
        );
    }

    #[test]
    fn test_parentheses_balanced() {
        assert_eq!(
            linked("(https://en.wikipedia.org/wiki/Rust_(language))"),
            vec![
                text("("),
                link(
                    "https://en.wikipedia.org/wiki/Rust_(language)",
                    "https://en.wikipedia.org/wiki/Rust_(language)"
                ),
                text(")"),
            ]
        );
    }

    #[test]
    fn test_scheme_without_host_ignored() {
        assert_eq!(linked("just http:// here"), vec![text("just http:// here")]);
    }

    #[test]
    fn test_links_email_with_mailto() {
        assert_eq!(
            linked("mail foo.bar+x@example.co.uk now."),
            vec![
                text("mail "),
                link("mailto:foo.bar+x@example.co.uk", "foo.bar+x@example.co.uk"),
                text(" now."),
            ]
        );
    }

    #[test]
    fn test_email_needs_dotted_domain() {
        assert_eq!(linked("user@localhost"), vec![text("user@localhost")]);
        assert_eq!(linked("a@b.c-"), vec![text("a@b.c-")]);
    }

    #[test]
    fn test_url_with_userinfo_is_one_link() {
        assert_eq!(
            linked("https://user@example.com/x"),
            vec![link("https://user@example.com/x", "https://user@example.com/x")]
        );
    }

    #[test]
    fn test_existing_links_untouched() {
        let original = Node::Paragraph(vec![link("https://a.test", "https://b.test")]);
        let mut doc = original.clone();
        link_bare_urls(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_text_inside_raw_anchor_untouched() {
        let original = Node::Paragraph(vec![
            Node::RawHtml("<a href=\"https://a.test\">".to_owned()),
            text("https://a.test"),
            Node::RawHtml("</a>".to_owned()),
            text(" www.b.test"),
        ]);
        let mut doc = original;
        link_bare_urls(&mut doc);
        assert_eq!(
            doc,
            Node::Paragraph(vec![
                Node::RawHtml("<a href=\"https://a.test\">".to_owned()),
                text("https://a.test"),
                Node::RawHtml("</a>".to_owned()),
                text(" "),
                link("http://www.b.test", "www.b.test"),
            ])
        );
    }

    #[test]
    fn test_code_untouched() {
        let original = Node::Paragraph(vec![Node::InlineCode("https://a.test".to_owned())]);
        let mut doc = original.clone();
        link_bare_urls(&mut doc);
        assert_eq!(doc, original);
    }
}
