//! Repository for the `identity_tokens` table.

use kino_core::types::{DbId, FilmId};
use sqlx::PgPool;

use super::PgTx;
use crate::models::identity_token::{CreateIdentityToken, IdentityToken};

/// Column list for `identity_tokens` queries.
const COLUMNS: &str = "id, film_id, reference_code, display_name, asset_type, dirty, \
    created_at, updated_at";

/// Provides query operations for identity tokens.
pub struct IdentityTokenRepo;

impl IdentityTokenRepo {
    /// Insert a new identity token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateIdentityToken,
    ) -> Result<IdentityToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO identity_tokens \
                (film_id, reference_code, display_name, asset_type, dirty) \
             VALUES ($1, $2, $3, $4, COALESCE($5, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdentityToken>(&query)
            .bind(input.film_id)
            .bind(&input.reference_code)
            .bind(&input.display_name)
            .bind(&input.asset_type)
            .bind(input.dirty)
            .fetch_one(pool)
            .await
    }

    /// Set or clear the dirty flag. Returns `None` if no such token exists.
    ///
    /// Called by the asset library when a definition changes and by the
    /// regeneration pipeline once dependents are rebuilt.
    pub async fn set_dirty(
        pool: &PgPool,
        id: DbId,
        dirty: bool,
    ) -> Result<Option<IdentityToken>, sqlx::Error> {
        let query = format!(
            "UPDATE identity_tokens SET dirty = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdentityToken>(&query)
            .bind(id)
            .bind(dirty)
            .fetch_optional(pool)
            .await
    }

    /// List a film's dirty tokens inside `tx`, ordered by reference code.
    pub async fn list_dirty_in(
        tx: &mut PgTx<'_>,
        film_id: FilmId,
    ) -> Result<Vec<IdentityToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM identity_tokens \
             WHERE film_id = $1 AND dirty = true \
             ORDER BY reference_code ASC"
        );
        sqlx::query_as::<_, IdentityToken>(&query)
            .bind(film_id)
            .fetch_all(&mut **tx)
            .await
    }
}
