//! Render diagnostics on stderr.
//!
//! Rendered HTML goes to stdout or a file; everything the user should read
//! about the run (what the sanitizer dropped, where output went, errors) is
//! styled here and written to stderr.

use console::{Style, Term};
use mdvis_config::RenderConfig;
use mdvis_renderer::SanitizeReport;

/// Stderr reporter for the render command.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Report the output file and its size.
    pub(crate) fn written(&self, target: &str, bytes: usize) {
        let msg = format!("Rendered {target} ({bytes} bytes)");
        self.line(&self.green, &msg);
    }

    /// Report sanitizer removals; silent for a clean document unless verbose.
    pub(crate) fn removals(&self, report: &SanitizeReport, verbose: bool) {
        match removal_summary(report) {
            Some(summary) => self.line(&self.yellow, &format!("Sanitizer removed {summary}")),
            None if verbose => self.line(&self.dim, "Sanitizer removed nothing"),
            None => {}
        }
    }

    /// Warn that a non-blank document rendered to nothing.
    pub(crate) fn empty_output(&self) {
        self.line(
            &self.yellow,
            "Rendered output is empty: all content was removed by the sanitizer",
        );
    }

    /// Report the enabled extensions (verbose mode).
    pub(crate) fn extensions(&self, render: &RenderConfig) {
        let msg = format!(
            "Extensions: gfm={} math={} diagrams={} highlight={}",
            render.gfm, render.math, render.diagrams, render.highlight
        );
        self.line(&self.dim, &msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red, msg);
    }

    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}

/// Human-readable removal counts, or `None` when nothing was removed.
fn removal_summary(report: &SanitizeReport) -> Option<String> {
    let counts = [
        (report.removed_elements, "element", "elements"),
        (report.unwrapped_elements, "unwrapped tag", "unwrapped tags"),
        (report.removed_attributes, "attribute", "attributes"),
        (report.removed_urls, "unsafe URL", "unsafe URLs"),
        (report.removed_comments, "comment", "comments"),
    ];
    let parts: Vec<String> = counts
        .iter()
        .filter(|(count, ..)| *count > 0)
        .map(|&(count, one, many)| format!("{count} {}", if count == 1 { one } else { many }))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}
