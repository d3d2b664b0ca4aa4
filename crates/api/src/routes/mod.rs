pub mod conflicts;
pub mod continuity;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /continuity/detect                    run a detection pass (POST)
///
/// /films/{film_id}/conflicts            list a film's conflicts (GET)
///
/// /conflicts/{id}/resolve               mark a conflict resolved (POST)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/continuity", continuity::router())
        .nest("/films", conflicts::film_router())
        .nest("/conflicts", conflicts::router())
}
