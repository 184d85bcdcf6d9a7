//! In-process [`DraftRepository`] backed by a map.
//!
//! Used by the test suites and for running the API without PostgreSQL.
//! Each method holds the lock for its whole read-modify-write, which gives
//! the same per-operation atomicity the database provides.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DraftRepository, StoreError};
use crate::draft::{Draft, NewDraft};
use crate::revision::{Revision, RevisionLog};
use crate::types::DbId;

#[derive(Debug)]
pub struct MemoryDraftRepository {
    drafts: RwLock<HashMap<DbId, Draft>>,
    next_id: AtomicI64,
}

impl MemoryDraftRepository {
    pub fn new() -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryDraftRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftRepository for MemoryDraftRepository {
    async fn insert(&self, input: NewDraft) -> Result<Draft, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let draft = Draft {
            id,
            owner_id: input.owner_id,
            title: input.title,
            content: input.content,
            current_score: 0,
            keywords: Vec::new(),
            suggestions: Vec::new(),
            revisions: RevisionLog::new(),
            created_at: input.created_at,
            updated_at: input.created_at,
        };
        self.drafts.write().await.insert(id, draft.clone());
        Ok(draft)
    }

    async fn find(&self, owner_id: DbId, id: DbId) -> Result<Option<Draft>, StoreError> {
        Ok(self
            .drafts
            .read()
            .await
            .get(&id)
            .filter(|d| d.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Draft>, StoreError> {
        let mut drafts: Vec<Draft> = self
            .drafts
            .read()
            .await
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(drafts)
    }

    async fn update(
        &self,
        draft: &Draft,
        appended: Option<&Revision>,
    ) -> Result<Option<Draft>, StoreError> {
        let mut drafts = self.drafts.write().await;
        let Some(stored) = drafts
            .get_mut(&draft.id)
            .filter(|d| d.owner_id == draft.owner_id)
        else {
            return Ok(None);
        };

        stored.title = draft.title.clone();
        stored.content = draft.content.clone();
        stored.current_score = draft.current_score;
        stored.keywords = draft.keywords.clone();
        stored.suggestions = draft.suggestions.clone();
        stored.updated_at = draft.updated_at;
        if let Some(revision) = appended {
            stored.revisions.append(revision.clone());
        }

        Ok(Some(stored.clone()))
    }

    async fn delete(&self, owner_id: DbId, id: DbId) -> Result<bool, StoreError> {
        let mut drafts = self.drafts.write().await;
        let owned = drafts.get(&id).is_some_and(|d| d.owner_id == owner_id);
        if owned {
            drafts.remove(&id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn new_draft(owner_id: DbId, title: &str) -> NewDraft {
        NewDraft {
            owner_id,
            title: title.into(),
            content: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let repo = MemoryDraftRepository::new();
        let a = repo.insert(new_draft(1, "a")).await.unwrap();
        let b = repo.insert(new_draft(1, "b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn find_filters_by_owner() {
        let repo = MemoryDraftRepository::new();
        let d = repo.insert(new_draft(1, "a")).await.unwrap();
        assert!(repo.find(1, d.id).await.unwrap().is_some());
        assert!(repo.find(2, d.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_appends_to_stored_history() {
        let repo = MemoryDraftRepository::new();
        let mut d = repo.insert(new_draft(1, "a")).await.unwrap();
        let rev = d.snapshot(Utc::now());
        d.current_score = 30;
        d.updated_at = d.updated_at + Duration::seconds(1);

        let saved = repo.update(&d, Some(&rev)).await.unwrap().unwrap();
        assert_eq!(saved.current_score, 30);
        assert_eq!(saved.revisions.entries(), &[rev]);
    }

    #[tokio::test]
    async fn update_of_foreign_draft_is_none() {
        let repo = MemoryDraftRepository::new();
        let mut d = repo.insert(new_draft(1, "a")).await.unwrap();
        d.owner_id = 2;
        assert!(repo.update(&d, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_respects_owner() {
        let repo = MemoryDraftRepository::new();
        let d = repo.insert(new_draft(1, "a")).await.unwrap();
        assert!(!repo.delete(2, d.id).await.unwrap());
        assert!(repo.delete(1, d.id).await.unwrap());
        assert!(repo.find(1, d.id).await.unwrap().is_none());
    }
}
