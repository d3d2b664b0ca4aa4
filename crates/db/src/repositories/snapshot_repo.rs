//! Loads the bounded record set one continuity pass reads.

use kino_core::continuity::{ContinuitySnapshot, DetectionScope};
use sqlx::PgPool;

use super::{
    ConflictRepo, IdentityTokenRepo, ShotRepo, StyleContractRepo, WardrobeAssignmentRepo,
};

/// Reads a [`ContinuitySnapshot`] for a scope.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Load shots, the current style version, dirty tokens, wardrobe
    /// assignments and resolved conflict keys for `scope` from a single
    /// `REPEATABLE READ` transaction, so concurrent writes cannot change the
    /// record set mid-pass.
    ///
    /// Shots, wardrobe assignments and resolved keys honour the scene filter;
    /// dirty tokens and the style contract are film-wide. When the scope has
    /// no shots the remaining reads are skipped and an empty snapshot is
    /// returned.
    pub async fn load(
        pool: &PgPool,
        scope: &DetectionScope,
    ) -> Result<ContinuitySnapshot, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let shots = ShotRepo::list_for_scope_in(&mut tx, scope).await?;
        if shots.is_empty() {
            tx.commit().await?;
            tracing::debug!(%scope, "No shots in scope");
            return Ok(ContinuitySnapshot::default());
        }

        let current_style_version =
            StyleContractRepo::current_version_in(&mut tx, scope.film_id).await?;
        let dirty_tokens = IdentityTokenRepo::list_dirty_in(&mut tx, scope.film_id).await?;
        let wardrobe = WardrobeAssignmentRepo::list_for_scope_in(&mut tx, scope).await?;
        let resolved = ConflictRepo::list_resolved_keys_in(&mut tx, scope).await?;

        tx.commit().await?;

        tracing::debug!(
            %scope,
            shots = shots.len(),
            current_style_version,
            dirty_tokens = dirty_tokens.len(),
            wardrobe_assignments = wardrobe.len(),
            resolved = resolved.len(),
            "Loaded continuity snapshot",
        );

        Ok(ContinuitySnapshot {
            shots: shots.into_iter().map(Into::into).collect(),
            current_style_version,
            dirty_tokens: dirty_tokens.into_iter().map(Into::into).collect(),
            wardrobe: wardrobe.into_iter().map(Into::into).collect(),
            resolved,
        })
    }
}
