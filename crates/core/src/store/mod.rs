//! Draft persistence port and the owner-scoped draft workflow.
//!
//! [`DraftRepository`] is the storage boundary: each method is one atomic
//! operation and every lookup is keyed by both draft id and owner id.
//! [`DraftStore`] layers the lifecycle rules on top: validation, ownership
//! (a foreign draft is reported exactly like a missing one), the
//! snapshot-then-apply save, and the analysis round trip.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::analysis::{analysis_title, AnalysisGateway};
use crate::draft::{CreateDraft, Draft, DraftPatch, NewDraft, ENTITY_DRAFT};
use crate::error::CoreError;
use crate::revision::Revision;
use crate::score::{MAX_SCORE, MIN_SCORE};
use crate::types::DbId;

/// Failure inside the storage backend.
#[derive(Debug, thiserror::Error)]
#[error("Store error: {0}")]
pub struct StoreError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }
}

/// Storage operations required by [`DraftStore`].
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Insert a draft with zero score, no keywords/suggestions, no revisions.
    async fn insert(&self, input: NewDraft) -> Result<Draft, StoreError>;

    /// Fetch a draft (with its revisions) if it exists and belongs to `owner_id`.
    async fn find(&self, owner_id: DbId, id: DbId) -> Result<Option<Draft>, StoreError>;

    /// All drafts of `owner_id`, most recently updated first.
    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Draft>, StoreError>;

    /// Persist the mutable fields of `draft` and, in the same atomic step,
    /// append `appended` to its revisions.
    ///
    /// Returns `None` if the draft no longer exists for its owner.
    async fn update(
        &self,
        draft: &Draft,
        appended: Option<&Revision>,
    ) -> Result<Option<Draft>, StoreError>;

    /// Hard-delete a draft and its revisions. Returns whether a row was removed.
    async fn delete(&self, owner_id: DbId, id: DbId) -> Result<bool, StoreError>;
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: ENTITY_DRAFT,
        id,
    }
}

/// Owner-scoped draft operations. The caller's user id is passed explicitly
/// on every call.
#[derive(Clone)]
pub struct DraftStore {
    repo: Arc<dyn DraftRepository>,
}

impl DraftStore {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self { repo }
    }

    /// Create a draft. Fails with `Validation` if the title is blank.
    pub async fn create(&self, owner_id: DbId, input: CreateDraft) -> Result<Draft, CoreError> {
        input.validate()?;

        let draft = self
            .repo
            .insert(NewDraft {
                owner_id,
                title: input.title,
                content: input.content.unwrap_or_default(),
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id = owner_id, draft_id = draft.id, "Draft created");
        Ok(draft)
    }

    /// Fetch an owned draft.
    pub async fn get(&self, owner_id: DbId, id: DbId) -> Result<Draft, CoreError> {
        self.repo
            .find(owner_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// All owned drafts, most recently updated first.
    pub async fn list(&self, owner_id: DbId) -> Result<Vec<Draft>, CoreError> {
        Ok(self.repo.list_by_owner(owner_id).await?)
    }

    /// Partially update an owned draft, optionally archiving its prior state.
    pub async fn save(&self, owner_id: DbId, id: DbId, patch: DraftPatch) -> Result<Draft, CoreError> {
        let draft = self.get(owner_id, id).await?;
        self.save_loaded(draft, patch).await
    }

    /// Permanently remove an owned draft and its revisions.
    pub async fn delete(&self, owner_id: DbId, id: DbId) -> Result<(), CoreError> {
        if !self.repo.delete(owner_id, id).await? {
            return Err(not_found(id));
        }
        tracing::info!(user_id = owner_id, draft_id = id, "Draft deleted");
        Ok(())
    }

    /// Score an owned draft and merge the result back.
    ///
    /// Ownership is checked first, then the text. The gateway receives
    /// `(title, plain_text)`. On success the draft is saved with a mandatory
    /// snapshot, the gateway's keywords/suggestions, its score clamped to
    /// `0..=100`, and its current rich content. On any gateway failure the
    /// draft is left untouched and the error is returned.
    pub async fn apply_analysis(
        &self,
        owner_id: DbId,
        id: DbId,
        title: &str,
        plain_text: &str,
        gateway: &dyn AnalysisGateway,
    ) -> Result<Draft, CoreError> {
        let draft = self.get(owner_id, id).await?;

        if plain_text.trim().is_empty() {
            return Err(CoreError::Validation("Content is required".into()));
        }

        let analysis = match gateway.analyze(analysis_title(title), plain_text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(user_id = owner_id, draft_id = id, error = %e, "Analysis failed");
                return Err(e.into());
            }
        };

        let patch = DraftPatch {
            content: Some(draft.content.clone()),
            current_score: Some(analysis.score.clamp(MIN_SCORE, MAX_SCORE)),
            keywords: Some(analysis.keywords),
            suggestions: Some(analysis.suggestions),
            snapshot: true,
            ..Default::default()
        };
        let saved = self.save_loaded(draft, patch).await?;

        tracing::info!(
            user_id = owner_id,
            draft_id = id,
            score = saved.current_score,
            revisions = saved.revisions.len(),
            "Analysis applied"
        );
        Ok(saved)
    }

    async fn save_loaded(&self, mut draft: Draft, patch: DraftPatch) -> Result<Draft, CoreError> {
        let id = draft.id;
        let owner_id = draft.owner_id;
        let appended = draft.apply(patch, Utc::now())?;

        let saved = self
            .repo
            .update(&draft, appended.as_ref())
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::debug!(
            user_id = owner_id,
            draft_id = id,
            snapshot = appended.is_some(),
            "Draft saved"
        );
        Ok(saved)
    }
}
