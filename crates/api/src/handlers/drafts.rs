//! Handlers for draft CRUD, revision history, and draft analysis.
//!
//! Every handler is scoped to the authenticated user; a draft owned by
//! someone else answers exactly like a missing one (404).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use seodraft_core::dashboard::Dashboard;
use seodraft_core::draft::{CreateDraft, DraftPatch};
use seodraft_core::search;
use seodraft_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive title/content filter. Absent or empty matches all.
    pub q: Option<String>,
}

impl SearchParams {
    fn term(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /drafts/{id}/analyze`. Missing fields fall back to the
/// stored draft: its title, and the plain text of its content.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeDraftRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/* --------------------------------------------------------------------------
Draft CRUD
-------------------------------------------------------------------------- */

/// GET /drafts
///
/// List the caller's drafts, most recently updated first, optionally
/// filtered by `?q=`.
pub async fn list_drafts(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let drafts = state.drafts.list(auth.user_id).await?;
    let drafts = search::filter(drafts, params.term());
    Ok(Json(DataResponse { data: drafts }))
}

/// POST /drafts
pub async fn create_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDraft>,
) -> AppResult<impl IntoResponse> {
    let draft = state.drafts.create(auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// GET /drafts/dashboard
///
/// Score statistics over all of the caller's drafts, plus summary cards
/// for the drafts matching `?q=`.
pub async fn dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let drafts = state.drafts.list(auth.user_id).await?;
    let dashboard = Dashboard::build(&drafts, params.term());
    Ok(Json(DataResponse { data: dashboard }))
}

/// GET /drafts/{id}
pub async fn get_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let draft = state.drafts.get(auth.user_id, id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// PUT /drafts/{id}
///
/// Partial update. With `"snapshot": true` the pre-update state is archived
/// as a revision first.
pub async fn update_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<DraftPatch>,
) -> AppResult<impl IntoResponse> {
    let draft = state.drafts.save(auth.user_id, id, patch).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// DELETE /drafts/{id}
pub async fn delete_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.drafts.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
History
-------------------------------------------------------------------------- */

/// GET /drafts/{id}/revisions
///
/// Revisions newest first, each with its 1-based revision number.
pub async fn list_revisions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let draft = state.drafts.get(auth.user_id, id).await?;
    let response = Json(DataResponse {
        data: draft.revisions.history(),
    })
    .into_response();
    Ok(response)
}

/// GET /drafts/{id}/series
///
/// Score-over-time chart points: one per revision, then the live score.
pub async fn score_series(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let draft = state.drafts.get(auth.user_id, id).await?;
    let series = draft.revisions.to_series(draft.current_score);
    Ok(Json(DataResponse { data: series }))
}

/* --------------------------------------------------------------------------
Analysis
-------------------------------------------------------------------------- */

/// POST /drafts/{id}/analyze
///
/// Score the draft and merge the result back, archiving the prior state.
/// On a gateway failure the draft is unchanged and 502 is returned.
pub async fn analyze_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<AnalyzeDraftRequest>,
) -> AppResult<impl IntoResponse> {
    let (title, text) = match (body.title, body.content) {
        (Some(title), Some(content)) => (title, content),
        (title, content) => {
            let draft = state.drafts.get(auth.user_id, id).await?;
            let text = content.unwrap_or_else(|| draft.plain_text());
            (title.unwrap_or(draft.title), text)
        }
    };

    let draft = state
        .drafts
        .apply_analysis(auth.user_id, id, &title, &text, state.analyzer.as_ref())
        .await?;
    Ok(Json(DataResponse { data: draft }))
}
