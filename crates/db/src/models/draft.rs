//! Draft and draft revision row models.

use seodraft_core::draft::Draft;
use seodraft_core::revision::{Revision, RevisionLog};
use seodraft_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `drafts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DraftRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub content: String,
    pub current_score: i32,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `draft_revisions` table.
///
/// Revisions are immutable snapshots; rows are only ever inserted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DraftRevisionRow {
    pub id: DbId,
    pub draft_id: DbId,
    pub content: String,
    pub score: i32,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: Timestamp,
}

impl From<DraftRevisionRow> for Revision {
    fn from(row: DraftRevisionRow) -> Self {
        Revision {
            content: row.content,
            score: row.score,
            keywords: row.keywords,
            suggestions: row.suggestions,
            timestamp: row.created_at,
        }
    }
}

impl DraftRow {
    /// Combine the draft row with its revision rows (already in id order).
    pub fn into_draft(self, revisions: Vec<DraftRevisionRow>) -> Draft {
        Draft {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            content: self.content,
            current_score: self.current_score,
            keywords: self.keywords,
            suggestions: self.suggestions,
            revisions: RevisionLog::from_entries(revisions.into_iter().map(Revision::from).collect()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
