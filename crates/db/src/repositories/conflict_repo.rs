//! Repository for the `continuity_conflicts` table.
//!
//! The detection pass only ever calls [`ConflictRepo::replace_in_scope`].
//! Listing and resolving serve the review workflow.

use kino_core::continuity::{ConflictFinding, DetectionScope, FindingKey};
use kino_core::types::{DbId, FilmId};
use sqlx::PgPool;

use super::PgTx;
use crate::models::conflict::{Conflict, ConflictFilter, ReconcileResult, ResolvedConflictKey};

/// Column list for `continuity_conflicts` queries.
const COLUMNS: &str = "id, film_id, scene_number, shot_id, conflict_type, description, \
    severity, resolved, resolved_at, resolved_by, created_at, updated_at";

/// Provides query operations for continuity conflicts.
pub struct ConflictRepo;

impl ConflictRepo {
    /// Replace every unresolved conflict in `scope` with `findings`.
    ///
    /// The delete and the batch insert share one transaction, so readers see
    /// either the previous set or the new one. Resolved rows are never
    /// touched. An empty `findings` still clears the scope.
    pub async fn replace_in_scope(
        pool: &PgPool,
        scope: &DetectionScope,
        findings: &[ConflictFinding],
    ) -> Result<ReconcileResult, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query(
            "DELETE FROM continuity_conflicts \
             WHERE film_id = $1 \
               AND ($2::INTEGER IS NULL OR scene_number = $2) \
               AND resolved = false",
        )
        .bind(scope.film_id)
        .bind(scope.scene_number)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let mut inserted = Vec::new();
        if !findings.is_empty() {
            let scenes: Vec<i32> = findings.iter().map(|f| f.scene_number).collect();
            let shot_ids: Vec<Option<DbId>> = findings.iter().map(|f| f.shot_id).collect();
            let types: Vec<&str> = findings.iter().map(|f| f.conflict_type.as_str()).collect();
            let descriptions: Vec<&str> =
                findings.iter().map(|f| f.description.as_str()).collect();
            let severities: Vec<&str> = findings.iter().map(|f| f.severity.as_str()).collect();

            let query = format!(
                "INSERT INTO continuity_conflicts \
                    (film_id, scene_number, shot_id, conflict_type, description, severity) \
                 SELECT $1, f.scene_number, f.shot_id, f.conflict_type, f.description, f.severity \
                 FROM UNNEST($2::integer[], $3::bigint[], $4::text[], $5::text[], $6::text[]) \
                    WITH ORDINALITY AS f(scene_number, shot_id, conflict_type, description, severity, ord) \
                 ORDER BY f.ord \
                 RETURNING {COLUMNS}"
            );
            inserted = sqlx::query_as::<_, Conflict>(&query)
                .bind(scope.film_id)
                .bind(&scenes)
                .bind(&shot_ids)
                .bind(&types)
                .bind(&descriptions)
                .bind(&severities)
                .fetch_all(&mut *tx)
                .await?;
            // BIGSERIAL ids follow the ORDER BY, RETURNING order does not have to.
            inserted.sort_by_key(|c| c.id);
        }

        tx.commit().await?;

        tracing::debug!(
            %scope,
            deleted,
            inserted = inserted.len(),
            "Replaced unresolved conflicts in scope",
        );

        Ok(ReconcileResult { deleted, inserted })
    }

    /// Keys of the resolved conflicts in `scope`, read inside `tx`.
    pub async fn list_resolved_keys_in(
        tx: &mut PgTx<'_>,
        scope: &DetectionScope,
    ) -> Result<Vec<FindingKey>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ResolvedConflictKey>(
            "SELECT scene_number, shot_id, conflict_type, description \
             FROM continuity_conflicts \
             WHERE film_id = $1 \
               AND ($2::INTEGER IS NULL OR scene_number = $2) \
               AND resolved = true",
        )
        .bind(scope.film_id)
        .bind(scope.scene_number)
        .fetch_all(&mut **tx)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(ResolvedConflictKey::into_finding_key)
            .collect())
    }

    /// List a film's conflicts, ordered by scene then id.
    ///
    /// Unresolved only unless `filter.include_resolved` is set.
    pub async fn list_by_film(
        pool: &PgPool,
        film_id: FilmId,
        filter: &ConflictFilter,
    ) -> Result<Vec<Conflict>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM continuity_conflicts \
             WHERE film_id = $1 \
               AND ($2::INTEGER IS NULL OR scene_number = $2) \
               AND ($3::TEXT IS NULL OR conflict_type = $3) \
               AND ($4 OR resolved = false) \
             ORDER BY scene_number ASC, id ASC"
        );
        sqlx::query_as::<_, Conflict>(&query)
            .bind(film_id)
            .bind(filter.scene_number)
            .bind(&filter.conflict_type)
            .bind(filter.include_resolved)
            .fetch_all(pool)
            .await
    }

    /// Find a conflict by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Conflict>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM continuity_conflicts WHERE id = $1");
        sqlx::query_as::<_, Conflict>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark an unresolved conflict as resolved by `user_id`.
    ///
    /// Returns `None` if the conflict does not exist or is already resolved.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Conflict>, sqlx::Error> {
        let query = format!(
            "UPDATE continuity_conflicts SET \
                resolved = true, \
                resolved_at = now(), \
                resolved_by = $2 \
             WHERE id = $1 AND resolved = false \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conflict>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
