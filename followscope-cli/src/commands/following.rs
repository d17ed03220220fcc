//! Following command - list, enrich, display and export followed accounts.

use anyhow::{Context, Result, bail};
use clap::Args;
use followscope_core::{AccountSource, ExportRecord, FollowerCount, validate_login};
use followscope_fetch::Fetcher;
use followscope_github::GitHubClient;
use followscope_store::{DEFAULT_TABLE_PATH, ExportTable, Settings, StoreError};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::report::{ExportSummary, ReportEntry, RunReport};
use crate::{Cli, OutputFormat};

/// Default number of followed accounts to fetch.
pub const DEFAULT_COUNT: u32 = 100;

/// Arguments for the following command.
#[derive(Args, Debug, Clone)]
pub struct FollowingArgs {
    /// GitHub username to fetch following accounts for (prompted if omitted).
    #[arg(long, short)]
    pub username: Option<String>,

    /// Number of following accounts to fetch.
    #[arg(long, short, default_value_t = DEFAULT_COUNT, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Destination table.
    #[arg(long, short, default_value = DEFAULT_TABLE_PATH)]
    pub output: PathBuf,

    /// Settings file to load before reading the environment.
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

/// Runs the following command.
pub async fn run(args: &FollowingArgs, cli: &Cli) -> Result<()> {
    let settings = Settings::load(args.env_file.as_deref())?;
    debug!(
        env_file_loaded = settings.env_file_loaded,
        api_url = %settings.api_url,
        "Loaded settings"
    );
    let credential = settings.require_credential()?.clone();

    let target = match &args.username {
        Some(login) => login.trim().to_string(),
        None => {
            let mut stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            prompt_login(&mut stdin, &mut stdout).await?
        }
    };
    validate_login(&target)?;

    let text = TextFormatter::new(cli.use_colors());
    if cli.format == OutputFormat::Text && !cli.quiet {
        println!("{}", text.format_title());
    }

    let fetcher = Fetcher::new(&settings.fetch)?;
    let client = GitHubClient::new(fetcher, &settings.api_url, Some(credential))?;
    let table = ExportTable::new(&args.output);

    info!(login = %target, count = args.count, "Fetching following accounts");
    let report = build_report(&client, &table, &target, args.count).await?;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", text.format_report(&report));
            }
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format_report(&report)?),
    }

    Ok(())
}

/// Asks for a login on `reader`, writing the prompt to `writer`.
pub async fn prompt_login<R, W>(reader: &mut R, writer: &mut W) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(b"Enter a GitHub username: ").await?;
    writer.flush().await?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .await
        .context("Failed to read username")?;

    let login = line.trim();
    if login.is_empty() {
        bail!("No username given");
    }
    Ok(login.to_string())
}

// ============================================================================
// Orchestration
// ============================================================================

/// Fetches the following list of `target`, enriches every account with its
/// follower count, and exports new accounts to `table`.
///
/// Each follower count is fetched once and shared by the display entries
/// and the export rows. An empty following list leaves the table untouched.
pub async fn build_report(
    source: &dyn AccountSource,
    table: &ExportTable,
    target: &str,
    max_count: u32,
) -> Result<RunReport, StoreError> {
    let following = source.list_following(target, max_count).await;
    let generated_at = chrono::Utc::now();

    if following.is_empty() {
        info!(login = target, "No data found");
        return Ok(RunReport {
            target: target.to_string(),
            generated_at,
            entries: Vec::new(),
            export: None,
        });
    }

    let mut counts: HashMap<String, Option<FollowerCount>> = HashMap::new();
    let mut entries = Vec::with_capacity(following.len());
    for (index, account) in following.into_iter().enumerate() {
        let followers = match counts.get(&account.login) {
            Some(cached) => *cached,
            None => {
                let fetched = source.follower_count(&account.login).await;
                counts.insert(account.login.clone(), fetched);
                fetched
            }
        };
        entries.push(ReportEntry {
            ordinal: index + 1,
            account,
            followers,
        });
    }
    debug!(accounts = entries.len(), lookups = counts.len(), "Enriched following list");

    let export = export_entries(table, target, &entries).await?;

    Ok(RunReport {
        target: target.to_string(),
        generated_at,
        entries,
        export: Some(export),
    })
}

/// Appends a row for every entry whose login is not in the table yet.
async fn export_entries(
    table: &ExportTable,
    target: &str,
    entries: &[ReportEntry],
) -> Result<ExportSummary, StoreError> {
    let mut seen = table.existing_logins().await?;
    let created = table.ensure_header().await?;

    let mut rows = Vec::new();
    let mut already_present = Vec::new();
    let mut skipped = Vec::new();

    for entry in entries {
        let login = &entry.account.login;
        if seen.contains(login) {
            already_present.push(login.clone());
            continue;
        }

        match entry.followers {
            Some(count) => {
                seen.insert(login.clone());
                rows.push(ExportRecord::new(login.as_str(), count.get(), target));
            }
            None => {
                warn!(login = %login, "Skipping account, follower count unavailable");
                skipped.push(login.clone());
            }
        }
    }

    table.append(&rows).await?;
    info!(
        path = %table.path().display(),
        written = rows.len(),
        already_present = already_present.len(),
        skipped = skipped.len(),
        "Export finished"
    );

    Ok(ExportSummary {
        path: table.path().to_path_buf(),
        created,
        written: rows,
        already_present,
        skipped,
    })
}
