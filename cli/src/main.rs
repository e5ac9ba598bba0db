mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Outcome;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Exit status for a well-formed input that failed validation
const EXIT_REJECTED: i32 = 2;

#[derive(Parser)]
#[command(name = "bookkeeper")]
#[command(about = "Validate and canonicalize render requests", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (text, json)
    #[arg(long, global = true, env = "BOOKKEEPER_FORMAT")]
    format: Option<String>,

    /// Maximum accepted request payload size in bytes
    #[arg(long, global = true, env = "BOOKKEEPER_MAX_REQUEST_BYTES")]
    max_request_bytes: Option<usize>,

    /// Config file path (defaults to ~/.bookkeeper.toml)
    #[arg(long, global = true, env = "BOOKKEEPER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a render request and print its canonical form
    Validate {
        /// Path to a JSON request, or `-` for stdin
        path: Option<PathBuf>,
    },

    /// Check a target branch name against git's ref-name rules
    CheckBranch {
        /// Branch name, with or without `refs/heads/`
        name: String,
    },

    /// Check that a URL looks like a git repository URL
    CheckUrl {
        url: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "bookkeeper=debug"
    } else {
        "bookkeeper=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config_path = cli.config.clone().or_else(config::config_file_path);
    let settings = config::resolve_settings(
        cli.format.as_deref(),
        cli.max_request_bytes,
        config_path.as_deref(),
    )?;

    let outcome = match cli.command {
        Commands::Validate { path } => commands::validate(path.as_deref(), &settings)?,
        Commands::CheckBranch { name } => commands::check_branch(&name, settings.format)?,
        Commands::CheckUrl { url } => commands::check_url(&url, settings.format)?,
    };

    if outcome == Outcome::Rejected {
        std::process::exit(EXIT_REJECTED);
    }

    Ok(())
}
