//! Identity token entity model and DTOs.

use kino_core::continuity::DirtyToken;
use kino_core::types::{DbId, FilmId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named production asset addressable from prompts as `{{REFERENCE_CODE}}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IdentityToken {
    pub id: DbId,
    pub film_id: FilmId,
    pub reference_code: String,
    pub display_name: String,
    /// e.g. `character`, `prop`, `vehicle`.
    pub asset_type: String,
    /// Set when the canonical definition changed after shots referenced it.
    pub dirty: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<IdentityToken> for DirtyToken {
    fn from(token: IdentityToken) -> Self {
        DirtyToken {
            reference_code: token.reference_code,
            display_name: token.display_name,
            asset_type: token.asset_type,
        }
    }
}

/// DTO for creating a new identity token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdentityToken {
    pub film_id: FilmId,
    pub reference_code: String,
    pub display_name: String,
    pub asset_type: String,
    /// Defaults to `false` if omitted.
    pub dirty: Option<bool>,
}
