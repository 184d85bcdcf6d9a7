use axum::routing::post;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Stateless analysis, registered as `/analysis`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(analysis::analyze))
}
