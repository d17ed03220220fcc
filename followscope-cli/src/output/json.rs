//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::report::{ExportSummary, ReportEntry, RunReport};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput<'a> {
    pub target: &'a str,
    #[serde(serialize_with = "serialize_datetime")]
    pub generated_at: DateTime<Utc>,
    pub accounts: Vec<AccountOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportOutput<'a>>,
}

/// A followed account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOutput<'a> {
    pub ordinal: usize,
    pub login: &'a str,
    pub html_url: &'a str,
    pub followers: Option<u64>,
}

/// Export summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput<'a> {
    pub path: String,
    pub created: bool,
    pub written: Vec<&'a str>,
    pub already_present: &'a [String],
    pub skipped: &'a [String],
}

impl<'a> From<&'a ReportEntry> for AccountOutput<'a> {
    fn from(entry: &'a ReportEntry) -> Self {
        Self {
            ordinal: entry.ordinal,
            login: &entry.account.login,
            html_url: &entry.account.html_url,
            followers: entry.followers.map(|count| count.get()),
        }
    }
}

impl<'a> From<&'a ExportSummary> for ExportOutput<'a> {
    fn from(export: &'a ExportSummary) -> Self {
        Self {
            path: export.path.display().to_string(),
            created: export.created,
            written: export.written.iter().map(|r| r.login.as_str()).collect(),
            already_present: &export.already_present,
            skipped: &export.skipped,
        }
    }
}

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a run report.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        let output = ReportOutput {
            target: &report.target,
            generated_at: report.generated_at,
            accounts: report.entries.iter().map(AccountOutput::from).collect(),
            export: report.export.as_ref().map(ExportOutput::from),
        };
        self.format(&output)
    }
}
