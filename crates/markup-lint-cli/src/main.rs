//! markup-lint CLI tool.
//!
//! Usage:
//! ```bash
//! markup-lint check [OPTIONS] <DOCUMENT>...
//! markup-lint list-rules
//! markup-lint init
//! ```
//!
//! Documents are the JSON node trees written by a markup parser.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Rule-based linter for HTML-like markup documents
#[derive(Parser)]
#[command(name = "markup-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MARKUP_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint parsed documents
    Check {
        /// Parsed document files (JSON)
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Message locale (e.g. "en", "ja"); overrides the config file
        #[arg(long)]
        locale: Option<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            documents,
            format,
            rules,
            locale,
        } => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .context("Failed to start async runtime")?;
            let failed = runtime.block_on(commands::check::run(
                &documents,
                format,
                rules.as_deref(),
                locale,
                &source,
            ))?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
