//! The (film, optional scene) pair a detection pass operates over.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::FilmId;

/// Message returned when a request omits the film identifier.
pub const FILM_ID_REQUIRED: &str = "film_id is required";

/// A validated detection scope.
///
/// A scene-scoped pass reads and replaces only that scene's records; a
/// film-scoped pass covers every scene of the film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectionScope {
    pub film_id: FilmId,
    pub scene_number: Option<i32>,
}

impl DetectionScope {
    pub fn film(film_id: FilmId) -> Self {
        Self {
            film_id,
            scene_number: None,
        }
    }

    pub fn scene(film_id: FilmId, scene_number: i32) -> Self {
        Self {
            film_id,
            scene_number: Some(scene_number),
        }
    }

    /// Validate raw request fields into a scope.
    ///
    /// A missing or blank `film_id` fails with [`FILM_ID_REQUIRED`].
    pub fn parse(film_id: Option<&str>, scene_number: Option<i32>) -> Result<Self, CoreError> {
        let raw = film_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Validation(FILM_ID_REQUIRED.to_string()))?;

        let film_id = raw.parse::<FilmId>().map_err(|_| {
            CoreError::Validation(format!("film_id must be a valid UUID, got '{raw}'"))
        })?;

        if let Some(n) = scene_number {
            if n < 0 {
                return Err(CoreError::Validation(format!(
                    "scene_number must not be negative, got {n}"
                )));
            }
        }

        Ok(Self {
            film_id,
            scene_number,
        })
    }
}

impl fmt::Display for DetectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scene_number {
            Some(n) => write!(f, "film {} scene {n}", self.film_id),
            None => write!(f, "film {}", self.film_id),
        }
    }
}
