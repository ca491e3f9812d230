//! Ticket analysis.
//!
//! Categorization assigns each ticket a label from the fixed rule table;
//! aggregation turns the categorized batch into report views.

pub mod aggregator;
pub mod categorizer;
pub mod rules;

pub use aggregator::{build_report, ReportLimits};
pub use categorizer::resolve_category;
