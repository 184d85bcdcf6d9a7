//! Repository for the `drafts` table.
//!
//! Every query that reads or writes an existing draft is scoped by
//! `owner_id` as well as `id`, so a foreign draft behaves exactly like a
//! missing one.

use std::collections::HashMap;

use seodraft_core::draft::{Draft, NewDraft};
use seodraft_core::revision::Revision;
use seodraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::draft::{DraftRevisionRow, DraftRow};
use crate::repositories::draft_revision_repo::DraftRevisionRepo;

/// Column list for drafts queries.
const COLUMNS: &str = "id, owner_id, title, content, current_score, keywords, suggestions, \
    created_at, updated_at";

/// Provides CRUD operations for drafts and their embedded revision history.
pub struct DraftRepo;

impl DraftRepo {
    /// Insert a new draft with an empty analysis state.
    pub async fn create(pool: &PgPool, input: &NewDraft) -> Result<Draft, sqlx::Error> {
        let query = format!(
            "INSERT INTO drafts (owner_id, title, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DraftRow>(&query)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.created_at)
            .fetch_one(pool)
            .await?;
        Ok(row.into_draft(Vec::new()))
    }

    /// Find a draft by id for its owner, including its revisions.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Draft>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {COLUMNS} FROM drafts WHERE id = $1 AND owner_id = $2");
        let Some(row) = sqlx::query_as::<_, DraftRow>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let revisions = DraftRevisionRepo::list_by_draft(&mut *conn, row.id).await?;
        Ok(Some(row.into_draft(revisions)))
    }

    /// List an owner's drafts, most recently updated first, with revisions.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Draft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drafts
             WHERE owner_id = $1
             ORDER BY updated_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, DraftRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut by_draft: HashMap<DbId, Vec<DraftRevisionRow>> = HashMap::new();
        for rev in DraftRevisionRepo::list_by_drafts(pool, &ids).await? {
            by_draft.entry(rev.draft_id).or_default().push(rev);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let revisions = by_draft.remove(&row.id).unwrap_or_default();
                row.into_draft(revisions)
            })
            .collect())
    }

    /// Write the mutable fields of `draft` and optionally append a revision,
    /// in one transaction.
    ///
    /// Returns `None` (and writes nothing) if no draft matches the id and owner.
    pub async fn update_with_append(
        pool: &PgPool,
        draft: &Draft,
        appended: Option<&Revision>,
    ) -> Result<Option<Draft>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE drafts SET
                title = $1,
                content = $2,
                current_score = $3,
                keywords = $4,
                suggestions = $5,
                updated_at = $6
             WHERE id = $7 AND owner_id = $8
             RETURNING {COLUMNS}"
        );
        let Some(row) = sqlx::query_as::<_, DraftRow>(&query)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(draft.current_score)
            .bind(&draft.keywords)
            .bind(&draft.suggestions)
            .bind(draft.updated_at)
            .bind(draft.id)
            .bind(draft.owner_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(revision) = appended {
            DraftRevisionRepo::append(&mut *tx, row.id, revision).await?;
        }
        let revisions = DraftRevisionRepo::list_by_draft(&mut *tx, row.id).await?;

        tx.commit().await?;
        Ok(Some(row.into_draft(revisions)))
    }

    /// Delete a draft for its owner. Revisions cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drafts WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
