//! Append-only revision history attached to a draft.
//!
//! Revisions are immutable snapshots of a draft's content and analysis state,
//! captured *before* the update that created them. Insertion order is
//! chronological order and is never changed.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Chart label for the trailing point that carries the live score.
pub const CURRENT_SERIES_LABEL: &str = "Current";

/// An immutable snapshot of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub content: String,
    pub score: i32,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub timestamp: Timestamp,
}

/// One point of the score-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub score: i32,
}

/// A revision paired with its 1-based position in the history.
#[derive(Debug, Clone, Serialize)]
pub struct NumberedRevision<'a> {
    pub number: usize,
    #[serde(flatten)]
    pub revision: &'a Revision,
}

/// Ordered, append-only sequence of revisions.
///
/// Exposes no way to remove or reorder entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionLog(Vec<Revision>);

impl RevisionLog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Rebuild a log from entries already in chronological order (e.g. rows
    /// loaded from storage ordered by insertion).
    pub fn from_entries(entries: Vec<Revision>) -> Self {
        Self(entries)
    }

    /// Add a snapshot to the end of the log.
    pub fn append(&mut self, revision: Revision) {
        self.0.push(revision);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in chronological (append) order.
    pub fn entries(&self) -> &[Revision] {
        &self.0
    }

    pub fn last(&self) -> Option<&Revision> {
        self.0.last()
    }

    /// Chart series: `Rev 1` .. `Rev n` followed by a `Current` point
    /// holding `current_score`. Always `len() + 1` points long.
    pub fn to_series(&self, current_score: i32) -> Vec<SeriesPoint> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, rev)| SeriesPoint {
                label: format!("Rev {}", i + 1),
                score: rev.score,
            })
            .chain(std::iter::once(SeriesPoint {
                label: CURRENT_SERIES_LABEL.to_string(),
                score: current_score,
            }))
            .collect()
    }

    /// Most recent first. Does not touch the underlying order.
    pub fn display_order(&self) -> Vec<&Revision> {
        self.0.iter().rev().collect()
    }

    /// Most recent first, each entry tagged with its revision number.
    pub fn history(&self) -> Vec<NumberedRevision<'_>> {
        self.0
            .iter()
            .enumerate()
            .rev()
            .map(|(i, revision)| NumberedRevision {
                number: i + 1,
                revision,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn rev(score: i32, minutes_ago: i64) -> Revision {
        Revision {
            content: format!("content at {score}"),
            score,
            keywords: vec![],
            suggestions: vec![],
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn log_of(scores: &[i32]) -> RevisionLog {
        let mut log = RevisionLog::new();
        for (i, score) in scores.iter().enumerate() {
            log.append(rev(*score, (scores.len() - i) as i64));
        }
        log
    }

    // -- to_series -----------------------------------------------------------

    #[test]
    fn series_of_empty_log_is_single_current_point() {
        let series = RevisionLog::new().to_series(64);
        assert_eq!(
            series,
            vec![SeriesPoint {
                label: "Current".into(),
                score: 64
            }]
        );
    }

    #[test]
    fn series_labels_revisions_in_order_then_current() {
        let series = log_of(&[10, 40, 55]).to_series(80);
        let labels: Vec<_> = series.iter().map(|p| p.label.as_str()).collect();
        let scores: Vec<_> = series.iter().map(|p| p.score).collect();
        assert_eq!(labels, vec!["Rev 1", "Rev 2", "Rev 3", "Current"]);
        assert_eq!(scores, vec![10, 40, 55, 80]);
    }

    #[test]
    fn series_length_is_revisions_plus_one() {
        for n in 0..5 {
            let scores: Vec<i32> = (0..n).map(|i| i * 10).collect();
            let log = log_of(&scores);
            let series = log.to_series(99);
            assert_eq!(series.len(), log.len() + 1);
            assert_eq!(series.last().map(|p| p.score), Some(99));
        }
    }

    // -- display_order / history ---------------------------------------------

    #[test]
    fn display_order_is_newest_first_and_non_mutating() {
        let log = log_of(&[1, 2, 3]);
        let shown: Vec<_> = log.display_order().iter().map(|r| r.score).collect();
        assert_eq!(shown, vec![3, 2, 1]);

        let stored: Vec<_> = log.entries().iter().map(|r| r.score).collect();
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[test]
    fn history_numbers_follow_append_position() {
        let log = log_of(&[5, 15]);
        let history = log.history();
        assert_eq!(history[0].number, 2);
        assert_eq!(history[0].revision.score, 15);
        assert_eq!(history[1].number, 1);
        assert_eq!(history[1].revision.score, 5);
    }

    #[test]
    fn append_never_touches_existing_entries() {
        let mut log = log_of(&[7]);
        let first = log.entries()[0].clone();
        log.append(rev(9, 0));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], first);
        assert_eq!(log.last().map(|r| r.score), Some(9));
    }

    #[test]
    fn serializes_as_plain_array() {
        let log = log_of(&[3]);
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["score"], 3);
    }
}
