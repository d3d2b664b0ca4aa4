//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod conflict;
pub mod film;
pub mod identity_token;
pub mod shot;
pub mod style_contract;
pub mod wardrobe_assignment;
