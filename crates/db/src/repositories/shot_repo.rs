//! Repository for the `shots` table.

use kino_core::continuity::DetectionScope;
use sqlx::PgPool;

use super::PgTx;
use crate::models::shot::{CreateShot, Shot};

/// Column list for `shots` queries.
const COLUMNS: &str = "id, film_id, scene_number, prompt, style_contract_version, \
    created_at, updated_at";

/// Provides query operations for shots.
pub struct ShotRepo;

impl ShotRepo {
    /// Insert a new shot, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateShot) -> Result<Shot, sqlx::Error> {
        let query = format!(
            "INSERT INTO shots (film_id, scene_number, prompt, style_contract_version) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(input.film_id)
            .bind(input.scene_number)
            .bind(&input.prompt)
            .bind(input.style_contract_version)
            .fetch_one(pool)
            .await
    }

    /// List the shots in `scope`, ordered by scene number then creation order.
    pub async fn list_for_scope_in(
        tx: &mut PgTx<'_>,
        scope: &DetectionScope,
    ) -> Result<Vec<Shot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shots \
             WHERE film_id = $1 AND ($2::INTEGER IS NULL OR scene_number = $2) \
             ORDER BY scene_number ASC, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(scope.film_id)
            .bind(scope.scene_number)
            .fetch_all(&mut **tx)
            .await
    }
}
