//! Shot entity model and DTOs.

use kino_core::continuity::ShotView;
use kino_core::types::{DbId, FilmId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A shot row from the `shots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shot {
    pub id: DbId,
    pub film_id: FilmId,
    pub scene_number: i32,
    pub prompt: Option<String>,
    /// Style contract version the shot was generated against; `None` if unbound.
    pub style_contract_version: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Shot> for ShotView {
    fn from(shot: Shot) -> Self {
        ShotView {
            id: shot.id,
            scene_number: shot.scene_number,
            prompt: shot.prompt,
            style_contract_version: shot.style_contract_version,
        }
    }
}

/// DTO for creating a new shot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShot {
    pub film_id: FilmId,
    pub scene_number: i32,
    pub prompt: Option<String>,
    pub style_contract_version: Option<i32>,
}
