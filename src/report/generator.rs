//! Report rendering and output.
//!
//! This module renders the in-memory [`Report`] as pretty-printed JSON or
//! as a Markdown summary, and writes the finished document in one go.

use crate::config::ReportFormat;
use crate::models::{RecurringIssue, Report, ReportSummary, Ticket};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

/// Render a report in the requested format.
pub fn render(report: &Report, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Ticket Analysis Report\n\n");
    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_recurring_section(&report.recurring_issues));
    output.push_str(&generate_high_risk_section(&report.high_risk_samples));

    output
}

/// Escape characters that would break a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Wrap text in an inline code span, widening the fence past any backtick run inside it.
fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let text = text.replace(['\r', '\n'], " ");

    if longest_run > 0 {
        format!("{} {} {}", fence, text, fence)
    } else {
        format!("{}{}{}", fence, text, fence)
    }
}

fn generate_distribution_table(title: &str, label: &str, counts: &IndexMap<String, usize>) -> String {
    let mut section = String::new();

    section.push_str(&format!("### {}\n\n", title));

    if counts.is_empty() {
        section.push_str("_None._\n\n");
        return section;
    }

    section.push_str(&format!("| {} | Count |\n", label));
    section.push_str("|:---|:---:|\n");
    for (key, count) in counts {
        section.push_str(&format!("| {} | {} |\n", cell(key), count));
    }
    section.push('\n');

    section
}

/// Generate the summary section.
fn generate_summary_section(summary: &ReportSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str(&format!("- **Total Tickets:** {}\n\n", summary.total_tickets));

    section.push_str("### Top Categories\n\n");
    if summary.top_categories.is_empty() {
        section.push_str("_None._\n\n");
    } else {
        section.push_str("| Category | Count |\n");
        section.push_str("|:---|:---:|\n");
        for (category, count) in &summary.top_categories {
            section.push_str(&format!("| {} | {} |\n", cell(category), count));
        }
        section.push('\n');
    }

    section.push_str(&generate_distribution_table(
        "Priority Distribution",
        "Priority",
        &summary.priority_distribution,
    ));
    section.push_str(&generate_distribution_table(
        "Status Distribution",
        "Status",
        &summary.status_distribution,
    ));

    section
}

/// Generate the recurring issues section.
fn generate_recurring_section(recurring: &[RecurringIssue]) -> String {
    let mut section = String::new();

    section.push_str("## Recurring Issues\n\n");

    if recurring.is_empty() {
        section.push_str("No ticket subjects to report.\n\n");
        return section;
    }

    for (i, issue) in recurring.iter().enumerate() {
        section.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            code_span(&issue.subject),
            issue.count
        ));
    }
    section.push('\n');

    section
}

/// Generate the high-risk sample section.
fn generate_high_risk_section(samples: &[Ticket]) -> String {
    let mut section = String::new();

    section.push_str("## High-Risk Samples\n\n");

    if samples.is_empty() {
        section.push_str("No security or high-priority tickets found.\n\n");
        return section;
    }

    section.push_str("| Ticket | Created | Priority | Status | Team | Category | Subject |\n");
    section.push_str("|:---|:---|:---:|:---|:---|:---|:---|\n");
    for ticket in samples {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            cell(&ticket.ticket_id),
            cell(&ticket.created_at),
            cell(&ticket.priority),
            cell(&ticket.status),
            cell(&ticket.assigned_team),
            cell(&ticket.category),
            cell(&ticket.subject),
        ));
    }
    section.push('\n');

    section
}

/// Write a rendered report, creating the parent directory if needed.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!("Creating output directory {}", parent.display());
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Format the console summary printed after a successful run.
pub fn console_summary(report: &Report, path: &Path) -> String {
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push("=== Ticket Analysis Summary ===".to_string());
    lines.push(format!("Total tickets: {}", report.summary.total_tickets));
    lines.push("Top categories:".to_string());
    for (category, count) in &report.summary.top_categories {
        lines.push(format!("  - {}: {}", category, count));
    }
    lines.push(String::new());
    lines.push(format!("Saved report -> {}", path.display()));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_report, ReportLimits};

    fn create_test_ticket(id: &str, subject: &str, priority: &str, category: &str) -> Ticket {
        Ticket {
            ticket_id: id.to_string(),
            created_at: "2024-04-02 14:30".to_string(),
            subject: subject.to_string(),
            description: "details".to_string(),
            priority: priority.to_string(),
            status: "Open".to_string(),
            assigned_team: "Service Desk".to_string(),
            category: category.to_string(),
        }
    }

    fn create_test_report() -> Report {
        let tickets = vec![
            create_test_ticket("T-1", "Cannot reset password", "High", "Password / Account Access"),
            create_test_ticket("T-2", "cannot reset password", "Low", "Password / Account Access"),
            create_test_ticket("T-3", "Phishing | urgent", "Medium", "Security / Phishing"),
        ];
        build_report(&tickets, &ReportLimits::default())
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report()).unwrap();

        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"total_tickets\": 3"));
        assert!(json.contains("\"recurring_issues\""));
        assert!(json.contains("\"high_risk_samples\""));
        assert!(json.contains("\"assigned_team\": \"Service Desk\""));
        // Pretty-printed with two-space indentation.
        assert!(json.starts_with("{\n  \"summary\""));
    }

    #[test]
    fn test_json_key_order() {
        let json = generate_json_report(&create_test_report()).unwrap();
        let summary = json.find("\"summary\"").unwrap();
        let recurring = json.find("\"recurring_issues\"").unwrap();
        let risky = json.find("\"high_risk_samples\"").unwrap();
        assert!(summary < recurring && recurring < risky);
    }

    #[test]
    fn test_empty_report_renders() {
        let report = build_report(&[], &ReportLimits::default());

        let value: serde_json::Value =
            serde_json::from_str(&generate_json_report(&report).unwrap()).unwrap();
        assert_eq!(value["summary"]["total_tickets"], 0);
        assert_eq!(value["summary"]["top_categories"], serde_json::json!([]));
        assert_eq!(value["summary"]["priority_distribution"], serde_json::json!({}));
        assert_eq!(value["recurring_issues"], serde_json::json!([]));
        assert_eq!(value["high_risk_samples"], serde_json::json!([]));

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("- **Total Tickets:** 0"));
        assert!(markdown.contains("No security or high-priority tickets found."));
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report());

        assert!(markdown.contains("# Ticket Analysis Report"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("| Password / Account Access | 2 |"));
        assert!(markdown.contains("1. `cannot reset password` (2)"));
        assert!(markdown.contains("## High-Risk Samples"));
        assert!(markdown.contains("Phishing \\| urgent"));
    }

    #[test]
    fn test_code_span_handles_backticks() {
        assert_eq!(code_span("printer jam"), "`printer jam`");
        assert_eq!(code_span("run `gpupdate`"), "`` run `gpupdate` ``");
        assert_eq!(code_span("a``b"), "``` a``b ```");
    }

    #[test]
    fn test_recurring_subject_with_backtick() {
        let tickets = vec![create_test_ticket("T-9", "Error `0x80070005`", "Low", "Other")];
        let markdown = generate_markdown_report(&build_report(&tickets, &ReportLimits::default()));
        assert!(markdown.contains("1. `` error `0x80070005` `` (1)"));
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let report = create_test_report();
        assert!(render(&report, ReportFormat::Json).unwrap().starts_with('{'));
        assert!(render(&report, ReportFormat::Markdown)
            .unwrap()
            .starts_with("# Ticket Analysis Report"));
    }

    #[test]
    fn test_write_report_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("nested").join("report.json");

        write_report("{}", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_report_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        assert!(write_report("{}", &blocker.join("report.json")).is_err());
    }

    #[test]
    fn test_console_summary() {
        let text = console_summary(&create_test_report(), Path::new("output/ticket_report.json"));
        assert!(text.contains("Total tickets: 3"));
        assert!(text.contains("  - Password / Account Access: 2"));
        assert!(text.contains("Saved report -> output/ticket_report.json"));
    }
}
