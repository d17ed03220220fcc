// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Followscope CLI - export the accounts a GitHub user follows.
//!
//! # Examples
//!
//! ```bash
//! # Prompt for a username, fetch up to 100 followed accounts
//! followscope
//!
//! # A specific user, 25 accounts
//! followscope --username octocat --count 25
//!
//! # Write to another table
//! followscope -u octocat -o data/following.csv
//!
//! # JSON output
//! followscope -u octocat --format json --pretty
//! ```

mod commands;
mod output;
mod report;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use followscope_store::StoreError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::following::{self, FollowingArgs};
use output::TextFormatter;

// ============================================================================
// CLI Definition
// ============================================================================

/// Followscope CLI - GitHub following export.
#[derive(Parser, Debug)]
#[command(name = "followscope")]
#[command(about = "Fetch GitHub following accounts")]
#[command(long_about = r#"
Followscope lists the accounts a GitHub user follows, looks up each
account's follower count, prints a report and appends new accounts to a
CSV table (Account, Followers, Following).

A GitHub token is required, read from GITHUB_TOKEN in the environment or
a .env file.

Examples:
  followscope                          # Prompt for a username
  followscope -u octocat -c 25         # 25 accounts followed by octocat
  followscope -u octocat --format json # JSON output
"#)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub args: FollowingArgs,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    /// Returns true if ANSI colors should be used.
    pub fn use_colors(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No credential configured.
    MissingCredential = 2,
}

impl ExitCode {
    /// Picks the exit code for a failed run.
    fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<StoreError>() {
            Some(StoreError::MissingCredential) => Self::MissingCredential,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("followscope=debug,info")
    } else {
        EnvFilter::new("followscope=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = following::run(&cli.args, &cli).await {
        let code = ExitCode::for_error(&e);
        if !cli.quiet || code == ExitCode::MissingCredential {
            eprintln!("{}", TextFormatter::new(cli.use_colors()).format_error(&format!("{e:#}")));
        }
        std::process::exit(code as i32);
    }

    Ok(())
}
