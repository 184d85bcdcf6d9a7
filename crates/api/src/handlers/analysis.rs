//! Stateless SEO analysis: score arbitrary text without touching any draft.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use seodraft_core::analysis::analysis_title;
use seodraft_core::draft::validate_content;
use seodraft_core::error::CoreError;
use seodraft_core::score::{MAX_SCORE, MIN_SCORE};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub title: Option<String>,
    /// Plain text to score.
    pub content: String,
}

/// POST /analysis
pub async fn analyze(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<impl IntoResponse> {
    if input.content.trim().is_empty() {
        return Err(CoreError::Validation("Content is required".into()).into());
    }
    validate_content(&input.content)?;

    let title = analysis_title(input.title.as_deref().unwrap_or_default());
    let mut analysis = state
        .analyzer
        .analyze(title, &input.content)
        .await
        .map_err(|e| {
            tracing::warn!(user_id = auth.user_id, error = %e, "Stateless analysis failed");
            CoreError::from(e)
        })?;
    analysis.score = analysis.score.clamp(MIN_SCORE, MAX_SCORE);

    tracing::info!(
        user_id = auth.user_id,
        score = analysis.score,
        "Stateless analysis completed"
    );
    Ok(Json(DataResponse { data: analysis }))
}
