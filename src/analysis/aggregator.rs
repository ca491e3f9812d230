//! Ticket aggregation and statistics.
//!
//! This module turns a batch of categorized tickets into the report views:
//! category ranking, priority and status distributions, recurring subjects
//! and the high-risk sample. Every counter is insertion ordered so the
//! output is byte-for-byte reproducible.

use super::categorizer::normalize;
use crate::models::{RecurringIssue, Report, ReportSummary, Ticket};
use indexmap::IndexMap;
use std::cmp::Reverse;
use tracing::debug;

/// Caps applied to the ranked report lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub top_categories: usize,
    pub recurring_issues: usize,
    pub high_risk_samples: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            top_categories: 6,
            recurring_issues: 8,
            high_risk_samples: 10,
        }
    }
}

impl From<&crate::config::ReportConfig> for ReportLimits {
    fn from(config: &crate::config::ReportConfig) -> Self {
        Self {
            top_categories: config.top_categories,
            recurring_issues: config.recurring_issues,
            high_risk_samples: config.high_risk_samples,
        }
    }
}

/// Count occurrences of each key, keeping first-seen order.
pub fn count_by<I, S>(keys: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for key in keys {
        *counts.entry(key.into()).or_default() += 1;
    }

    counts
}

/// The `n` most frequent keys, highest count first.
///
/// Equal counts keep their first-seen order (the sort is stable).
pub fn most_common(counts: &IndexMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();

    ranked.sort_by_key(|(_, count)| Reverse(*count));
    ranked.truncate(n);

    ranked
}

/// Most frequent categories.
pub fn top_categories(tickets: &[Ticket], n: usize) -> Vec<(String, usize)> {
    let counts = count_by(tickets.iter().map(|t| t.category.as_str()));
    most_common(&counts, n)
}

/// Ticket count per raw priority label, unrecognized labels included.
pub fn priority_distribution(tickets: &[Ticket]) -> IndexMap<String, usize> {
    count_by(tickets.iter().map(|t| t.priority.as_str()))
}

/// Ticket count per status label.
pub fn status_distribution(tickets: &[Ticket]) -> IndexMap<String, usize> {
    count_by(tickets.iter().map(|t| t.status.as_str()))
}

/// Most frequent subjects after trimming and lowercasing.
///
/// Tickets with an empty subject are skipped. No minimum count is applied;
/// the cutoff is the ranking alone.
pub fn recurring_issues(tickets: &[Ticket], n: usize) -> Vec<RecurringIssue> {
    let counts = count_by(
        tickets
            .iter()
            .filter(|t| !t.subject.is_empty())
            .map(|t| normalize(&t.subject)),
    );

    most_common(&counts, n)
        .into_iter()
        .map(|(subject, count)| RecurringIssue { subject, count })
        .collect()
}

/// Security tickets and High-priority tickets, highest priority first.
///
/// The sort is stable so tickets of equal priority keep their input order.
pub fn high_risk_samples(tickets: &[Ticket], n: usize) -> Vec<Ticket> {
    let mut risky: Vec<&Ticket> = tickets.iter().filter(|t| t.is_high_risk()).collect();

    risky.sort_by_key(|t| Reverse(t.priority_rank()));

    risky.into_iter().take(n).cloned().collect()
}

/// Build the full report from a batch of categorized tickets.
pub fn build_report(tickets: &[Ticket], limits: &ReportLimits) -> Report {
    let summary = ReportSummary {
        total_tickets: tickets.len(),
        top_categories: top_categories(tickets, limits.top_categories),
        priority_distribution: priority_distribution(tickets),
        status_distribution: status_distribution(tickets),
    };

    let report = Report {
        summary,
        recurring_issues: recurring_issues(tickets, limits.recurring_issues),
        high_risk_samples: high_risk_samples(tickets, limits.high_risk_samples),
    };

    debug!(
        total = report.summary.total_tickets,
        categories = report.summary.top_categories.len(),
        recurring = report.recurring_issues.len(),
        high_risk = report.high_risk_samples.len(),
        "built report"
    );

    report
}
