//! Route definitions for drafts, registered under `/drafts`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::drafts;
use crate::state::AppState;

/// Draft routes.
///
/// ```text
/// GET    /                  list_drafts (?q=)
/// POST   /                  create_draft
/// GET    /dashboard         dashboard (?q=)
/// GET    /{id}              get_draft
/// PUT    /{id}              update_draft
/// DELETE /{id}              delete_draft
/// POST   /{id}/analyze      analyze_draft
/// GET    /{id}/revisions    list_revisions
/// GET    /{id}/series       score_series
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(drafts::list_drafts).post(drafts::create_draft))
        .route("/dashboard", get(drafts::dashboard))
        .route(
            "/{id}",
            get(drafts::get_draft)
                .put(drafts::update_draft)
                .delete(drafts::delete_draft),
        )
        .route("/{id}/analyze", post(drafts::analyze_draft))
        .route("/{id}/revisions", get(drafts::list_revisions))
        .route("/{id}/series", get(drafts::score_series))
}
