//! Score range, banding, and dashboard aggregation.

use serde::Serialize;

use crate::draft::Draft;

/// Lowest valid SEO score.
pub const MIN_SCORE: i32 = 0;

/// Highest valid SEO score.
pub const MAX_SCORE: i32 = 100;

/// Round a raw score to the nearest integer and clamp it to `0..=100`.
///
/// Non-finite input clamps to the nearest bound (`NaN` becomes 0).
pub fn clamp_score(raw: f64) -> i32 {
    if raw.is_nan() {
        return MIN_SCORE;
    }
    raw.round().clamp(MIN_SCORE as f64, MAX_SCORE as f64) as i32
}

/// Whether a score already lies in the valid range.
pub fn is_valid_score(score: i32) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// Qualitative band for a score, as shown next to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreBand {
    pub fn for_score(score: i32) -> Self {
        match score {
            s if s >= 80 => Self::Excellent,
            s if s >= 60 => Self::Good,
            s if s >= 40 => Self::Fair,
            _ => Self::NeedsWork,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsWork => "Needs Work",
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Dashboard statistics over a user's drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreStats {
    pub total: usize,
    pub average_score: i32,
    pub best_score: i32,
}

impl ScoreStats {
    /// Count, rounded mean, and maximum of `current_score`. All zero when
    /// `drafts` is empty.
    pub fn from_drafts(drafts: &[Draft]) -> Self {
        if drafts.is_empty() {
            return Self::default();
        }
        let sum: i64 = drafts.iter().map(|d| i64::from(d.current_score)).sum();
        let average = (sum as f64 / drafts.len() as f64).round() as i32;
        let best = drafts
            .iter()
            .map(|d| d.current_score)
            .max()
            .unwrap_or(MIN_SCORE);

        Self {
            total: drafts.len(),
            average_score: average,
            best_score: best,
        }
    }
}
