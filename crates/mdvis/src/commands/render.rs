//! `mdvis render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use mdvis_config::{CliSettings, Config};
use mdvis_renderer::Renderer;

use crate::error::CliError;
use crate::output::Output;

/// Input path that reads Markdown from stdin.
const STDIN_INPUT: &str = "-";

/// Arguments for the render command.
#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (`-` reads stdin).
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdvis.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Disable `$` math.
    #[arg(long)]
    no_math: bool,

    /// Disable mermaid diagram blocks.
    #[arg(long)]
    no_diagrams: bool,

    /// Disable syntax highlighting of fenced code.
    #[arg(long)]
    no_highlight: bool,

    /// Enable verbose output (show sanitizer and timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            gfm: self.no_gfm.then_some(false),
            math: self.no_math.then_some(false),
            diagrams: self.no_diagrams.then_some(false),
            highlight: self.no_highlight.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let renderer = Renderer::new(Arc::new(config.build_schema()?))
            .with_gfm(config.render.gfm)
            .with_math(config.render.math)
            .with_diagrams(config.render.diagrams)
            .with_highlight(config.render.highlight);
        if self.verbose {
            output.extensions(&config.render);
        }

        let markdown = read_input(&self.input)?;
        let (html, report) = renderer.render_with_report(&markdown);
        output.removals(&report, self.verbose);
        if html.is_empty() && !markdown.trim().is_empty() {
            output.empty_output();
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, html.as_str())?;
                output.written(&path.display().to_string(), html.as_str().len());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{html}")?;
            }
        }
        Ok(())
    }
}

/// Read Markdown from a file, or from stdin for `-`.
fn read_input(input: &Path) -> Result<String, CliError> {
    if input.as_os_str() == STDIN_INPUT {
        let mut markdown = String::new();
        std::io::stdin().read_to_string(&mut markdown)?;
        return Ok(markdown);
    }
    if !input.is_file() {
        return Err(CliError::Validation(format!(
            "Input file not found: {}",
            input.display()
        )));
    }
    Ok(std::fs::read_to_string(input)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(dir: &Path, input: PathBuf) -> RenderArgs {
        let config = dir.join("mdvis.toml");
        std::fs::write(&config, "").unwrap();
        RenderArgs {
            input,
            output: Some(dir.join("out.html")),
            config: Some(config),
            no_gfm: false,
            no_math: false,
            no_diagrams: false,
            no_highlight: false,
            verbose: false,
        }
    }

    #[test]
    fn test_renders_file_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "# Hi\n\n<script>alert(1)</script>\n\n$x$").unwrap();

        args(dir.path(), input).execute().unwrap();

        let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert_eq!(
            html,
            r#"<h1>Hi</h1><p><span class="math math-inline">x</span></p>"#
        );
    }

    #[test]
    fn test_cli_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "$x$ ~~y~~").unwrap();

        let mut args = args(dir.path(), input);
        args.no_math = true;
        args.no_gfm = true;
        args.execute().unwrap();

        let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert_eq!(html, "<p>$x$ ~~y~~</p>");
    }

    #[test]
    fn test_config_extends_schema() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "<mark>m</mark>").unwrap();

        let args = args(dir.path(), input);
        std::fs::write(
            args.config.as_ref().unwrap(),
            "[sanitize]\ntags = [\"mark\"]\n",
        )
        .unwrap();
        args.execute().unwrap();

        let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert_eq!(html, "<p><mark>m</mark></p>");
    }

    #[test]
    fn test_no_highlight_flag_keeps_plain_code() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "```rust\nlet a = 1;\n```").unwrap();

        let mut args = args(dir.path(), input);
        args.no_highlight = true;
        args.execute().unwrap();

        let html = std::fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">let a = 1;\n</code></pre>"
        );
    }

    #[test]
    fn test_missing_input_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = args(dir.path(), dir.path().join("missing.md"))
            .execute()
            .unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().starts_with("Input file not found"));
    }

    #[test]
    fn test_forbidden_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "x").unwrap();

        let args = args(dir.path(), input);
        std::fs::write(
            args.config.as_ref().unwrap(),
            "[sanitize]\ntags = [\"script\"]\n",
        )
        .unwrap();
        assert!(matches!(args.execute().unwrap_err(), CliError::Config(_)));
    }
}
