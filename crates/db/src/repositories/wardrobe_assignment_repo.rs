//! Repository for the `wardrobe_assignments` table.

use kino_core::continuity::DetectionScope;
use sqlx::PgPool;

use super::PgTx;
use crate::models::wardrobe_assignment::{CreateWardrobeAssignment, WardrobeAssignment};

/// Column list for `wardrobe_assignments` queries.
const COLUMNS: &str = "id, film_id, scene_number, character_name, clothing_item, \
    created_at, updated_at";

/// Provides query operations for wardrobe assignments.
pub struct WardrobeAssignmentRepo;

impl WardrobeAssignmentRepo {
    /// Insert a new wardrobe assignment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWardrobeAssignment,
    ) -> Result<WardrobeAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO wardrobe_assignments \
                (film_id, scene_number, character_name, clothing_item) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WardrobeAssignment>(&query)
            .bind(input.film_id)
            .bind(input.scene_number)
            .bind(&input.character_name)
            .bind(&input.clothing_item)
            .fetch_one(pool)
            .await
    }

    /// List the assignments in `scope` inside `tx`, in recording order.
    pub async fn list_for_scope_in(
        tx: &mut PgTx<'_>,
        scope: &DetectionScope,
    ) -> Result<Vec<WardrobeAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wardrobe_assignments \
             WHERE film_id = $1 AND ($2::INTEGER IS NULL OR scene_number = $2) \
             ORDER BY scene_number ASC, id ASC"
        );
        sqlx::query_as::<_, WardrobeAssignment>(&query)
            .bind(scope.film_id)
            .bind(scope.scene_number)
            .fetch_all(&mut **tx)
            .await
    }
}
