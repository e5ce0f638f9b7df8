//! mdvis CLI - Markdown to safe HTML.
//!
//! Provides commands for:
//! - `render`: Render a Markdown file (or stdin) to sanitized HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// mdvis - Markdown to safe HTML.
#[derive(Parser)]
#[command(name = "mdvis", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown to sanitized HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from(["mdvis", "render", "doc.md", "-o", "doc.html", "--no-math"])
            .unwrap();
        let Commands::Render(args) = cli.command;
        assert!(!args.verbose);
    }

    #[test]
    fn test_render_requires_input() {
        assert!(Cli::try_parse_from(["mdvis", "render"]).is_err());
    }
}
