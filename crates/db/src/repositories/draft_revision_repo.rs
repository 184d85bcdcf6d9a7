//! Repository for the `draft_revisions` table.
//!
//! Revisions are append-only: there is no update or per-row delete. Rows go
//! away only through the `ON DELETE CASCADE` on their draft.

use sqlx::{PgConnection, PgPool};
use seodraft_core::revision::Revision;
use seodraft_core::types::DbId;

use crate::models::draft::DraftRevisionRow;

/// Column list for draft_revisions queries.
const COLUMNS: &str = "id, draft_id, content, score, keywords, suggestions, created_at";

/// Provides append and read operations for draft revisions.
pub struct DraftRevisionRepo;

impl DraftRevisionRepo {
    /// Append a snapshot. Runs on the caller's connection so it can share a
    /// transaction with the draft update.
    pub async fn append(
        conn: &mut PgConnection,
        draft_id: DbId,
        revision: &Revision,
    ) -> Result<DraftRevisionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO draft_revisions
                (draft_id, content, score, keywords, suggestions, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DraftRevisionRow>(&query)
            .bind(draft_id)
            .bind(&revision.content)
            .bind(revision.score)
            .bind(&revision.keywords)
            .bind(&revision.suggestions)
            .bind(revision.timestamp)
            .fetch_one(conn)
            .await
    }

    /// All revisions of a draft in append order.
    pub async fn list_by_draft(
        conn: &mut PgConnection,
        draft_id: DbId,
    ) -> Result<Vec<DraftRevisionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM draft_revisions
             WHERE draft_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, DraftRevisionRow>(&query)
            .bind(draft_id)
            .fetch_all(conn)
            .await
    }

    /// Revisions for several drafts at once, grouped by draft and in append
    /// order within each draft.
    pub async fn list_by_drafts(
        pool: &PgPool,
        draft_ids: &[DbId],
    ) -> Result<Vec<DraftRevisionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM draft_revisions
             WHERE draft_id = ANY($1)
             ORDER BY draft_id, id ASC"
        );
        sqlx::query_as::<_, DraftRevisionRow>(&query)
            .bind(draft_ids)
            .fetch_all(pool)
            .await
    }

    /// Number of revisions recorded for a draft.
    pub async fn count_by_draft(pool: &PgPool, draft_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM draft_revisions WHERE draft_id = $1")
                .bind(draft_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
