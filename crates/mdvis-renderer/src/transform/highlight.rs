//! Class-based syntax highlighting of fenced code blocks.
//!
//! A fenced block whose language has a bundled grammar becomes raw HTML:
//! `<pre><code class="language-x">` around `span`s tagged with
//! [`HIGHLIGHT_CLASS_PREFIX`] scope classes. Styling is left to a stylesheet;
//! no inline styles are emitted, so the sanitizer only has to keep `class`.

use std::sync::LazyLock;

use mdvis_html::escape_attr;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::DIAGRAM_LANGUAGE;
use crate::mdast::Node;

/// Prefix of every highlight class (`hl-keyword`, `hl-string`, ...).
pub const HIGHLIGHT_CLASS_PREFIX: &str = "hl-";

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

pub(super) fn highlight_code_blocks(node: &mut Node) {
    let Some(children) = node.children_mut() else {
        return;
    };
    for child in children.iter_mut() {
        if !matches!(child, Node::CodeBlock { .. }) {
            highlight_code_blocks(child);
            continue;
        }
        if let Some(html) = code_block_html(child) {
            *child = Node::RawHtml(html);
        }
    }
}

fn code_block_html(node: &Node) -> Option<String> {
    let Node::CodeBlock { value, .. } = node else {
        return None;
    };
    let lang = node.lang().filter(|&lang| lang != DIAGRAM_LANGUAGE)?;
    let body = highlight_code(lang, value)?;
    Some(format!(
        r#"<pre><code class="language-{}">{body}</code></pre>"#,
        escape_attr(lang)
    ))
}

/// Highlighted HTML for `code`, or `None` when `lang` has no grammar.
fn highlight_code(lang: &str, code: &str) -> Option<String> {
    let syntax = SYNTAX_SET.find_syntax_by_token(lang)?;
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        &SYNTAX_SET,
        ClassStyle::SpacedPrefixed {
            prefix: HIGHLIGHT_CLASS_PREFIX,
        },
    );
    for line in LinesWithEndings::from(code) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::debug!(lang, error = %err, "Highlighting failed, keeping plain code");
            return None;
        }
    }
    Some(generator.finalize())
}
