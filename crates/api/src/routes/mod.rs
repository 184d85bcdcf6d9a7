pub mod analysis;
pub mod drafts;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /drafts                      list (?q=), create
/// /drafts/dashboard            stats + summary cards (?q=)
/// /drafts/{id}                 get, update, delete
/// /drafts/{id}/analyze         analyze and merge (POST)
/// /drafts/{id}/revisions       revision history (GET)
/// /drafts/{id}/series          score chart points (GET)
///
/// /analysis                    stateless analysis (POST)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/drafts", drafts::router())
        .nest("/analysis", analysis::router())
}
