//! Data models for the ticket analyzer.
//!
//! This module contains the core data structures used throughout
//! the application for representing tickets and the generated report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analysis::rules::SECURITY_CATEGORY;

/// Recognized ticket priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Low priority - the default when the column is missing
    Low,
    /// Medium priority
    Medium,
    /// High priority - the top recognized level, always treated as high risk
    High,
}

impl Priority {
    /// Parse an exact priority label. Matching is case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }

    /// Ordering weight of this priority (Low = 1 .. High = 3).
    pub fn weight(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Ordering weight of an arbitrary priority label.
    ///
    /// Unrecognized labels (including the empty string) rank 0.
    pub fn rank(label: &str) -> u8 {
        Self::from_label(label).map_or(0, Self::weight)
    }
}

/// A single support ticket after categorization.
///
/// All fields are kept as the raw strings from the source file so that
/// unrecognized priorities and free-text statuses survive into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: String,
    /// Creation timestamp, kept opaque.
    pub created_at: String,
    pub subject: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub assigned_team: String,
    /// Either the source's category hint or the computed category. Never empty.
    pub category: String,
}

impl Ticket {
    /// Returns the ordering weight of this ticket's priority.
    pub fn priority_rank(&self) -> u8 {
        Priority::rank(&self.priority)
    }

    /// Whether this ticket belongs in the high-risk sample pool.
    pub fn is_high_risk(&self) -> bool {
        self.category == SECURITY_CATEGORY || Priority::from_label(&self.priority) == Some(Priority::High)
    }
}

/// A normalized subject line and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringIssue {
    pub subject: String,
    pub count: usize,
}

/// Aggregate counts over the whole ticket batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of tickets.
    pub total_tickets: usize,
    /// Most frequent categories as `[label, count]` pairs, most frequent first.
    pub top_categories: Vec<(String, usize)>,
    /// Ticket count per priority label, in first-seen order.
    pub priority_distribution: IndexMap<String, usize>,
    /// Ticket count per status label, in first-seen order.
    pub status_distribution: IndexMap<String, usize>,
}

/// The complete ticket analysis report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Summary statistics.
    pub summary: ReportSummary,
    /// Most frequent normalized subjects.
    pub recurring_issues: Vec<RecurringIssue>,
    /// Security-related or high-priority tickets, highest priority first.
    pub high_risk_samples: Vec<Ticket>,
}

impl Report {
    /// Returns true if the report was built from an empty batch.
    pub fn is_empty(&self) -> bool {
        self.summary.total_tickets == 0
    }
}
