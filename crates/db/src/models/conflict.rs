//! Continuity conflict entity model and DTOs.

use kino_core::continuity::{ConflictType, FindingKey};
use kino_core::types::{DbId, FilmId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted continuity finding from the `continuity_conflicts` table.
///
/// `conflict_type` and `severity` hold the strings of
/// [`kino_core::continuity::ConflictType`] and
/// [`kino_core::continuity::Severity`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conflict {
    pub id: DbId,
    pub film_id: FilmId,
    pub scene_number: i32,
    /// `None` for scene-scoped conflicts.
    pub shot_id: Option<DbId>,
    pub conflict_type: String,
    pub description: String,
    pub severity: String,
    pub resolved: bool,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The identifying columns of a resolved conflict.
#[derive(Debug, Clone, FromRow)]
pub struct ResolvedConflictKey {
    pub scene_number: i32,
    pub shot_id: Option<DbId>,
    pub conflict_type: String,
    pub description: String,
}

impl ResolvedConflictKey {
    /// Convert to a [`FindingKey`]; `None` for an unknown conflict type.
    pub fn into_finding_key(self) -> Option<FindingKey> {
        let conflict_type = ConflictType::from_str(&self.conflict_type).ok()?;
        Some(FindingKey {
            scene_number: self.scene_number,
            shot_id: self.shot_id,
            conflict_type,
            description: self.description,
        })
    }
}

/// Filters for listing a film's conflicts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConflictFilter {
    pub scene_number: Option<i32>,
    pub conflict_type: Option<String>,
    #[serde(default)]
    pub include_resolved: bool,
}

/// Result of replacing the unresolved conflicts of one scope.
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    /// Stale unresolved rows removed from the scope.
    pub deleted: u64,
    /// Newly inserted rows, in finding order.
    pub inserted: Vec<Conflict>,
}
