//! Dashboard read model: per-draft summaries plus aggregate score stats.

use serde::Serialize;

use crate::draft::Draft;
use crate::score::{ScoreBand, ScoreStats};
use crate::search;
use crate::types::{DbId, Timestamp};

/// Number of plain-text characters shown on a draft card.
pub const PREVIEW_CHARS: usize = 150;

/// Shorten `text` to `max_chars` characters, appending `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Compact view of a draft for list/card rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSummary {
    pub id: DbId,
    pub title: String,
    pub preview: String,
    pub current_score: i32,
    pub band: ScoreBand,
    pub band_label: &'static str,
    pub revision_count: usize,
    pub has_analysis: bool,
    pub updated_at: Timestamp,
}

impl From<&Draft> for DraftSummary {
    fn from(draft: &Draft) -> Self {
        let band = ScoreBand::for_score(draft.current_score);
        Self {
            id: draft.id,
            title: draft.title.clone(),
            preview: preview(&draft.plain_text(), PREVIEW_CHARS),
            current_score: draft.current_score,
            band,
            band_label: band.label(),
            revision_count: draft.revisions.len(),
            has_analysis: draft.has_analysis(),
            updated_at: draft.updated_at,
        }
    }
}

/// Stats over every draft, with the card list narrowed by the search term.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: ScoreStats,
    pub drafts: Vec<DraftSummary>,
}

impl Dashboard {
    pub fn build(drafts: &[Draft], term: &str) -> Self {
        Self {
            stats: ScoreStats::from_drafts(drafts),
            drafts: drafts
                .iter()
                .filter(|d| search::matches(d, term))
                .map(DraftSummary::from)
                .collect(),
        }
    }
}
