//! Linear search over a user's drafts.
//!
//! Matches case-insensitively against the title or the plain text derived
//! from the rich content. No index is kept; draft lists are per-user and
//! small.

use crate::draft::Draft;

/// Whether `draft` matches `term` (already lowercased).
fn matches_lowercased(draft: &Draft, term: &str) -> bool {
    draft.title.to_lowercase().contains(term) || draft.plain_text().to_lowercase().contains(term)
}

/// Whether `draft` matches `term`, ignoring case. An empty term matches
/// everything.
pub fn matches(draft: &Draft, term: &str) -> bool {
    term.is_empty() || matches_lowercased(draft, &term.to_lowercase())
}

/// Keep the drafts matching `term`, preserving input order.
///
/// An empty term returns the input unchanged.
pub fn filter(drafts: Vec<Draft>, term: &str) -> Vec<Draft> {
    if term.is_empty() {
        return drafts;
    }
    let needle = term.to_lowercase();
    drafts
        .into_iter()
        .filter(|d| matches_lowercased(d, &needle))
        .collect()
}
