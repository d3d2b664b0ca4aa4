//! Domain logic for the kino continuity engine.
//!
//! Everything in this crate is pure: no database, no HTTP, no clock reads.
//! The `db` and `api` crates feed it records and persist what it returns.

pub mod continuity;
pub mod error;
pub mod references;
pub mod types;
