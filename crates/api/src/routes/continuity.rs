//! Route definitions for continuity detection.

use axum::routing::post;
use axum::Router;

use crate::handlers::continuity;
use crate::state::AppState;

/// Detection entry point, mounted at `/continuity`.
///
/// ```text
/// POST /detect   -> detect_conflicts
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/detect", post(continuity::detect_conflicts))
}
