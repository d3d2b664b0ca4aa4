//! Repository for the `films` table.

use kino_core::types::FilmId;
use sqlx::PgPool;

use crate::models::film::{CreateFilm, Film};

/// Column list for `films` queries.
const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides CRUD operations for films.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a new film, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFilm) -> Result<Film, sqlx::Error> {
        let query = format!("INSERT INTO films (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Film>(&query)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a film by its UUID.
    pub async fn find_by_id(pool: &PgPool, id: FilmId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
