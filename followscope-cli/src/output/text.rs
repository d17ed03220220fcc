//! Text output formatting with colors.

use crate::report::{ExportSummary, RunReport};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";

/// Width of the `=` rule around banners.
const RULE_WIDTH: usize = 40;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the opening banner.
    pub fn format_title(&self) -> String {
        self.banner(&self.yellow("GitHub Following Analysis"))
    }

    /// Formats a complete run: account list, export summary, closing banner.
    pub fn format_report(&self, report: &RunReport) -> String {
        let mut sections = Vec::new();

        if report.is_empty() {
            sections.push(format!(
                "{} {}",
                self.red("No data found for user:"),
                self.yellow(&report.target)
            ));
        } else {
            sections.push(self.format_accounts(report));
            if let Some(export) = &report.export {
                sections.push(self.format_export(export));
            }
        }

        sections.push(self.banner(&self.yellow("Analysis Complete")));
        sections.join("\n\n")
    }

    /// Formats the numbered account list.
    pub fn format_accounts(&self, report: &RunReport) -> String {
        let title = format!(
            "{} {}{}",
            self.yellow("Accounts followed by"),
            self.green(&report.target),
            self.yellow(":")
        );

        let mut lines = vec![self.banner(&title), String::new()];
        for entry in &report.entries {
            let followers = entry
                .followers
                .map_or_else(|| "unknown".to_string(), |count| count.to_string());

            lines.push(format!(
                "{} {} - {}",
                self.magenta(&format!("{:>3}.", entry.ordinal)),
                self.green(&entry.account.login),
                entry.account.html_url
            ));
            lines.push(format!("    {} {}", self.cyan("Followers:"), self.yellow(&followers)));
        }

        lines.join("\n")
    }

    /// Formats the export summary.
    pub fn format_export(&self, export: &ExportSummary) -> String {
        let mut lines = Vec::new();

        for login in &export.skipped {
            lines.push(self.red(&format!(
                "Skipping {login} due to error fetching follower count"
            )));
        }

        lines.push(format!(
            "{} {}",
            self.green("Data has been written to"),
            self.yellow(&export.path.display().to_string())
        ));

        let mut counts = vec![format!("{} new", export.written.len())];
        if !export.already_present.is_empty() {
            counts.push(format!("{} already exported", export.already_present.len()));
        }
        if !export.skipped.is_empty() {
            counts.push(format!("{} skipped", export.skipped.len()));
        }
        lines.push(format!("  ({})", counts.join(", ")));

        lines.join("\n")
    }

    /// Formats an error message.
    pub fn format_error(&self, message: &str) -> String {
        self.red(&format!("Error: {message}"))
    }

    fn banner(&self, title: &str) -> String {
        let rule = self.cyan(&"=".repeat(RULE_WIDTH));
        format!("{rule}\n{}\n{rule}", self.bold(title))
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn magenta(&self, text: &str) -> String {
        self.paint(MAGENTA, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
