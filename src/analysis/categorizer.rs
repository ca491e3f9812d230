//! Keyword-based ticket categorization.

use super::rules::{CATEGORY_RULES, FALLBACK_CATEGORY};
use tracing::trace;

/// Trim and lowercase a free-text field.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Pick the category whose keywords best match the ticket text.
///
/// The rule with the most distinct keyword hits wins; a tie goes to the
/// earlier rule. Returns [`FALLBACK_CATEGORY`] when nothing matches.
pub fn categorize(subject: &str, description: &str) -> &'static str {
    let blob = format!("{} {}", normalize(subject), normalize(description));

    let mut best = FALLBACK_CATEGORY;
    let mut best_hits = 0;

    for rule in CATEGORY_RULES {
        let hits = rule.hits(&blob);
        if hits > best_hits {
            best_hits = hits;
            best = rule.label;
        }
    }

    trace!(category = best, hits = best_hits, "categorized ticket");
    best
}

/// Use a non-empty category hint verbatim, otherwise categorize the text.
pub fn resolve_category(hint: Option<&str>, subject: &str, description: &str) -> String {
    match hint {
        Some(hint) if !hint.is_empty() => hint.to_string(),
        _ => categorize(subject, description).to_string(),
    }
}
