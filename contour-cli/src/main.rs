//! Contour CLI - structural snapshots and semantic diffs for source trees.
//!
//! Extracts an approximate structural model (functions, classes, methods,
//! imports) from multi-language codebases, compares tree states at the
//! entity level, and resolves heuristic dependency graphs.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use contour_core::ScanOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use commands::graph::GraphFormat;
use config::ContourConfig;

/// Structural snapshots and semantic diffs for source trees.
#[derive(Parser)]
#[command(name = "contour")]
#[command(author, version)]
#[command(about = "Structural snapshots and semantic diffs for source trees")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  contour snapshot .                 Capture a structural snapshot
  contour diff ./v1 ./v2             Compare two tree states
  contour diff ./v1 ./v2 --categorize  Group changed functions by intent
  contour graph . --format dot       Render the import graph for Graphviz")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Maximum file size to extract, in kilobytes
    #[arg(long, global = true, value_name = "KB")]
    max_file_size: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the structural snapshot of a source tree
    #[command(visible_alias = "snap")]
    Snapshot {
        /// Path to analyze (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compare two tree states and report entity-level changes
    Diff {
        /// Old tree state
        old_path: String,

        /// New tree state
        new_path: String,

        /// Group changed functions into semantic categories
        #[arg(long)]
        categorize: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Resolve imports into a file dependency graph
    Graph {
        /// Path to analyze (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: GraphFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Write rendered output to a file or stdout.
pub(crate) fn write_output(content: &str, output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write output to {}", path))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content)?;
        }
    }
    Ok(())
}

fn scan_options(cli_max_kb: Option<u64>, config: &ContourConfig) -> ScanOptions {
    let mut options = ScanOptions {
        ignore_patterns: config.ignore_patterns(),
        follow_symlinks: config.scanner.follow_symlinks,
        ..Default::default()
    };
    // CLI flag wins over config, config over the built-in default.
    if let Some(kb) = cli_max_kb {
        options.max_file_size = kb * 1024;
    } else if let Some(bytes) = config.max_file_size_bytes() {
        options.max_file_size = bytes;
    }
    options
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let config = ContourConfig::load(Path::new("."));
    if let Some(use_color) = config.output.color {
        colored::control::set_override(use_color);
    }
    let pretty = cli.pretty || config.output.pretty.unwrap_or(false);
    let options = scan_options(cli.max_file_size, &config);

    let command = match cli.command {
        Some(command) => command,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Snapshot { path, output } => {
            commands::snapshot::run(&path, &options, pretty, output.as_deref())
        }
        Commands::Diff {
            old_path,
            new_path,
            categorize,
            output,
        } => commands::diff::run(
            &old_path,
            &new_path,
            &options,
            categorize,
            pretty,
            output.as_deref(),
        ),
        Commands::Graph {
            path,
            format,
            output,
        } => commands::graph::run(&path, &options, format, pretty, output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["contour", "diff", "old", "new", "--categorize"]);
        match cli.command {
            Some(Commands::Diff {
                old_path,
                new_path,
                categorize,
                ..
            }) => {
                assert_eq!(old_path, "old");
                assert_eq!(new_path, "new");
                assert!(categorize);
            }
            _ => panic!("expected diff subcommand"),
        }
    }

    #[test]
    fn test_max_file_size_flag_overrides_config() {
        let config = ContourConfig::default();
        let options = scan_options(Some(2), &config);
        assert_eq!(options.max_file_size, 2048);
    }

    #[test]
    fn test_default_scan_options_carry_ignore_defaults() {
        let config = ContourConfig::default();
        let options = scan_options(None, &config);
        assert!(options
            .ignore_patterns
            .iter()
            .any(|p| p == "node_modules/"));
    }
}
