use std::sync::Arc;

use seodraft_core::analysis::AnalysisGateway;
use seodraft_core::store::DraftStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database pool, when drafts are persisted in PostgreSQL. `None` when
    /// the store runs over an in-memory repository.
    pub pool: Option<seodraft_db::DbPool>,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Owner-scoped draft operations.
    pub drafts: DraftStore,
    /// External SEO scorer.
    pub analyzer: Arc<dyn AnalysisGateway>,
}
