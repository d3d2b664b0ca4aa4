//! Style contract entity model and DTOs.

use kino_core::types::{DbId, FilmId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One immutable version of a film's visual style rules.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StyleContract {
    pub id: DbId,
    pub film_id: FilmId,
    pub version: i32,
    pub rules: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for publishing a new contract version. The version number is assigned
/// by the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStyleContract {
    pub film_id: FilmId,
    pub rules: Option<serde_json::Value>,
}
