//! Route definitions for reviewing recorded conflicts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::conflicts;
use crate::state::AppState;

/// Film-scoped listing, mounted at `/films`.
///
/// ```text
/// GET /{film_id}/conflicts   -> list_film_conflicts
/// ```
pub fn film_router() -> Router<AppState> {
    Router::new().route(
        "/{film_id}/conflicts",
        get(conflicts::list_film_conflicts),
    )
}

/// Per-conflict actions, mounted at `/conflicts`.
///
/// ```text
/// POST /{id}/resolve   -> resolve_conflict
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/resolve", post(conflicts::resolve_conflict))
}
