//! PostgreSQL implementation of the domain [`DraftRepository`] port.

use async_trait::async_trait;
use seodraft_core::draft::{Draft, NewDraft};
use seodraft_core::revision::Revision;
use seodraft_core::store::{DraftRepository, StoreError};
use seodraft_core::types::DbId;

use crate::repositories::DraftRepo;
use crate::DbPool;

/// Adapts [`DraftRepo`] to the domain persistence port.
#[derive(Debug, Clone)]
pub struct PgDraftRepository {
    pool: DbPool,
}

impl PgDraftRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftRepository for PgDraftRepository {
    async fn insert(&self, input: NewDraft) -> Result<Draft, StoreError> {
        DraftRepo::create(&self.pool, &input)
            .await
            .map_err(StoreError::new)
    }

    async fn find(&self, owner_id: DbId, id: DbId) -> Result<Option<Draft>, StoreError> {
        DraftRepo::find_by_id(&self.pool, owner_id, id)
            .await
            .map_err(StoreError::new)
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Draft>, StoreError> {
        DraftRepo::list_by_owner(&self.pool, owner_id)
            .await
            .map_err(StoreError::new)
    }

    async fn update(
        &self,
        draft: &Draft,
        appended: Option<&Revision>,
    ) -> Result<Option<Draft>, StoreError> {
        DraftRepo::update_with_append(&self.pool, draft, appended)
            .await
            .map_err(StoreError::new)
    }

    async fn delete(&self, owner_id: DbId, id: DbId) -> Result<bool, StoreError> {
        DraftRepo::delete(&self.pool, owner_id, id)
            .await
            .map_err(StoreError::new)
    }
}
