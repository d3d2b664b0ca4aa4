//! Wardrobe assignment entity model and DTOs.

use kino_core::continuity::WardrobeEntry;
use kino_core::types::{DbId, FilmId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One character wearing one clothing item in one scene.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WardrobeAssignment {
    pub id: DbId,
    pub film_id: FilmId,
    pub scene_number: i32,
    pub character_name: String,
    pub clothing_item: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WardrobeAssignment> for WardrobeEntry {
    fn from(a: WardrobeAssignment) -> Self {
        WardrobeEntry {
            scene_number: a.scene_number,
            character_name: a.character_name,
            clothing_item: a.clothing_item,
        }
    }
}

/// DTO for creating a new wardrobe assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWardrobeAssignment {
    pub film_id: FilmId,
    pub scene_number: i32,
    pub character_name: String,
    pub clothing_item: String,
}
