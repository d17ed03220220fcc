//! Result of one report run.

use chrono::{DateTime, Utc};
use followscope_core::{AccountRef, ExportRecord, FollowerCount};
use std::path::PathBuf;

/// One followed account with its follower count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// 1-based position in the following list.
    pub ordinal: usize,
    /// The followed account.
    pub account: AccountRef,
    /// Follower count, if it could be fetched.
    pub followers: Option<FollowerCount>,
}

/// What the export step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Destination table.
    pub path: PathBuf,
    /// Whether the table was created by this run.
    pub created: bool,
    /// Rows appended by this run.
    pub written: Vec<ExportRecord>,
    /// Logins skipped because the table already had them.
    pub already_present: Vec<String>,
    /// Logins skipped because their follower count was unavailable.
    pub skipped: Vec<String>,
}

/// Outcome of one run for one target login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Login whose following list was fetched.
    pub target: String,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Followed accounts, in the order the API returned them.
    pub entries: Vec<ReportEntry>,
    /// Export result; `None` when there was nothing to export.
    pub export: Option<ExportSummary>,
}

impl RunReport {
    /// Returns true if the following list came back empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
