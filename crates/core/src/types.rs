/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Films are addressed by UUID, both in the database and on the wire.
pub type FilmId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
