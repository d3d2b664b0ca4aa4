//! Request handlers.
//!
//! Handlers validate input, delegate to the engine or a repository in
//! `kino_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod conflicts;
pub mod continuity;
