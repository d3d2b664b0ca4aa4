//! Repository for the `style_contracts` table.

use kino_core::types::FilmId;
use sqlx::PgPool;

use super::PgTx;
use crate::models::style_contract::{CreateStyleContract, StyleContract};

/// Column list for `style_contracts` queries.
const COLUMNS: &str = "id, film_id, version, rules, created_at, updated_at";

/// Provides query operations for versioned style contracts.
pub struct StyleContractRepo;

impl StyleContractRepo {
    /// Publish the next contract version for a film.
    ///
    /// Versions start at 1 and increase by one per publish. The film row is
    /// locked for the duration so concurrent publishes cannot pick the same
    /// number.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStyleContract,
    ) -> Result<StyleContract, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM films WHERE id = $1 FOR UPDATE")
            .bind(input.film_id)
            .execute(&mut *tx)
            .await?;

        let next_ver: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(version), 0) + 1 \
             FROM style_contracts WHERE film_id = $1",
        )
        .bind(input.film_id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO style_contracts (film_id, version, rules) \
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb)) \
             RETURNING {COLUMNS}"
        );
        let contract = sqlx::query_as::<_, StyleContract>(&query)
            .bind(input.film_id)
            .bind(next_ver.0)
            .bind(&input.rules)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contract)
    }

    /// Find the highest-version contract for a film, if any exists.
    pub async fn find_current(
        pool: &PgPool,
        film_id: FilmId,
    ) -> Result<Option<StyleContract>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM style_contracts \
             WHERE film_id = $1 \
             ORDER BY version DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, StyleContract>(&query)
            .bind(film_id)
            .fetch_optional(pool)
            .await
    }

    /// Current contract version for a film, read inside `tx`.
    pub async fn current_version_in(
        tx: &mut PgTx<'_>,
        film_id: FilmId,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: (Option<i32>,) =
            sqlx::query_as("SELECT MAX(version) FROM style_contracts WHERE film_id = $1")
                .bind(film_id)
                .fetch_one(&mut **tx)
                .await?;
        Ok(row.0)
    }
}
