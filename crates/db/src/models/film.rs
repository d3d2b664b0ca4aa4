//! Film entity model and DTOs.

use kino_core::types::{FilmId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A film row from the `films` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Film {
    pub id: FilmId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new film.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFilm {
    pub title: String,
}
