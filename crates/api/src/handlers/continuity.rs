//! Handler for the continuity detection entry point.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use kino_core::continuity::scope::FILM_ID_REQUIRED;
use kino_core::continuity::DetectionScope;
use kino_core::error::CoreError;
use serde::Deserialize;

use crate::engine::continuity::{ContinuityEngine, DetectionOutcome};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /continuity/detect`.
#[derive(Debug, Deserialize)]
pub struct DetectConflictsRequest {
    pub film_id: Option<String>,
    pub scene_number: Option<i32>,
}

/// Parse a detect request body.
///
/// An empty body or a JSON `null` carries no `film_id` and is reported as
/// such. Anything else that is not a JSON object is a bad request.
fn parse_detect_request(body: &[u8]) -> AppResult<DetectConflictsRequest> {
    let missing = || AppError::Core(CoreError::Validation(FILM_ID_REQUIRED.to_string()));

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(missing());
    }

    serde_json::from_slice::<Option<DetectConflictsRequest>>(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
        .ok_or_else(missing)
}

/// POST /continuity/detect
///
/// Run a detection pass over the requested scope and return the conflicts
/// it recorded with a one-line summary. The body is returned unwrapped:
/// `{ "conflicts": [...], "summary": "..." }`.
pub async fn detect_conflicts(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<DetectionOutcome>> {
    let input = parse_detect_request(&body)?;

    let scope = DetectionScope::parse(input.film_id.as_deref(), input.scene_number)?;

    tracing::info!(
        %scope,
        user_id = auth.user_id,
        role = %auth.role,
        "Continuity detection requested",
    );

    let outcome = ContinuityEngine::new(state.pool.clone()).run(&scope).await?;

    Ok(Json(outcome))
}
