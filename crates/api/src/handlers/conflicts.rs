//! Handlers for reviewing recorded continuity conflicts.
//!
//! Resolving is the review workflow's job; detection passes never resolve
//! anything and never touch resolved rows.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kino_core::continuity::ConflictType;
use kino_core::error::CoreError;
use kino_core::types::{DbId, FilmId};
use kino_db::models::conflict::ConflictFilter;
use kino_db::repositories::ConflictRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /films/{film_id}/conflicts
///
/// List a film's conflicts. Query parameters: `scene_number`,
/// `conflict_type`, `include_resolved` (default `false`).
pub async fn list_film_conflicts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(film_id): Path<FilmId>,
    Query(filter): Query<ConflictFilter>,
) -> AppResult<impl IntoResponse> {
    if let Some(ty) = filter.conflict_type.as_deref() {
        ConflictType::from_str(ty)?;
    }

    let conflicts = ConflictRepo::list_by_film(&state.pool, film_id, &filter).await?;

    Ok(Json(DataResponse { data: conflicts }))
}

/// POST /conflicts/{id}/resolve
///
/// Mark a conflict resolved. Resolving twice is a 409.
pub async fn resolve_conflict(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let Some(conflict) = ConflictRepo::resolve(&state.pool, id, auth.user_id).await? else {
        return match ConflictRepo::find_by_id(&state.pool, id).await? {
            Some(_) => Err(AppError::Core(CoreError::Conflict(format!(
                "Conflict {id} is already resolved"
            )))),
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "Conflict",
                id,
            })),
        };
    };

    tracing::info!(
        conflict_id = id,
        film_id = %conflict.film_id,
        conflict_type = %conflict.conflict_type,
        user_id = auth.user_id,
        "Conflict resolved",
    );

    Ok(Json(DataResponse { data: conflict }))
}
