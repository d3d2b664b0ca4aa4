//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Reads that must share one
//! snapshot take a transaction instead (the `*_in` variants).

pub mod conflict_repo;
pub mod film_repo;
pub mod identity_token_repo;
pub mod shot_repo;
pub mod snapshot_repo;
pub mod style_contract_repo;
pub mod wardrobe_assignment_repo;

pub use conflict_repo::ConflictRepo;
pub use film_repo::FilmRepo;
pub use identity_token_repo::IdentityTokenRepo;
pub use shot_repo::ShotRepo;
pub use snapshot_repo::SnapshotRepo;
pub use style_contract_repo::StyleContractRepo;
pub use wardrobe_assignment_repo::WardrobeAssignmentRepo;

/// Transaction handle shared by the snapshot reads.
pub type PgTx<'c> = sqlx::Transaction<'c, sqlx::Postgres>;
