//! One continuity detection pass over a [`DetectionScope`].
//!
//! The pass is sequential and stateless: snapshot load, rule evaluation,
//! scoped replacement. Two passes over the identical scope race on the
//! replacement and the last commit wins; passes over different scopes never
//! touch each other's rows.

use kino_core::continuity::{
    evaluate, summarize, ConflictFinding, ContinuitySnapshot, DetectionScope, NO_SHOTS_SUMMARY,
};
use kino_db::models::conflict::Conflict;
use kino_db::repositories::{ConflictRepo, SnapshotRepo};
use serde::Serialize;
use sqlx::PgPool;

/// Why a pass aborted. The `Display` text is safe to return to callers.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("failed to load snapshot: {}", describe_store_error(.0))]
    LoadSnapshot(#[source] sqlx::Error),

    #[error("failed to record conflicts: {}", describe_store_error(.0))]
    Persist(#[source] sqlx::Error),
}

/// Result of a completed pass.
#[derive(Debug, Serialize)]
pub struct DetectionOutcome {
    /// The conflicts recorded by this pass.
    pub conflicts: Vec<Conflict>,
    pub summary: String,
}

/// Runs detection passes against the record store.
pub struct ContinuityEngine {
    pool: PgPool,
}

impl ContinuityEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run one full pass over `scope`.
    ///
    /// A scope without shots returns [`NO_SHOTS_SUMMARY`] and writes nothing.
    /// Otherwise every unresolved conflict in the scope is replaced by this
    /// pass's findings, even when there are none.
    pub async fn run(&self, scope: &DetectionScope) -> Result<DetectionOutcome, DetectionError> {
        let snapshot = SnapshotRepo::load(&self.pool, scope)
            .await
            .map_err(DetectionError::LoadSnapshot)?;

        if !snapshot.has_shots() {
            tracing::info!(%scope, "No shots to analyze, skipping continuity pass");
            return Ok(DetectionOutcome {
                conflicts: Vec::new(),
                summary: NO_SHOTS_SUMMARY.to_string(),
            });
        }

        let findings = Self::detect(scope, &snapshot);
        let summary = summarize(&findings);

        let result = ConflictRepo::replace_in_scope(&self.pool, scope, &findings)
            .await
            .map_err(DetectionError::Persist)?;

        tracing::info!(
            %scope,
            deleted = result.deleted,
            inserted = result.inserted.len(),
            "Continuity pass complete",
        );

        Ok(DetectionOutcome {
            conflicts: result.inserted,
            summary,
        })
    }

    fn detect(scope: &DetectionScope, snapshot: &ContinuitySnapshot) -> Vec<ConflictFinding> {
        let report = evaluate(snapshot);
        for (rule, count) in &report.counts {
            tracing::debug!(%scope, rule = rule.name(), findings = count, "Rule evaluated");
        }
        if report.suppressed > 0 {
            tracing::debug!(
                %scope,
                suppressed = report.suppressed,
                "Skipped findings already resolved",
            );
        }
        report.findings
    }
}

/// Describe a store failure without echoing connection details.
///
/// Server-side database errors carry their SQLSTATE and message; anything at
/// the connection level (I/O, TLS, configuration, pool) is reduced to a
/// fixed phrase since those messages can include hosts or credentials.
pub fn describe_store_error(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => format!(
            "database error {}: {}",
            db_err.code().as_deref().unwrap_or("unknown"),
            db_err.message()
        ),
        sqlx::Error::RowNotFound => "expected row not found".to_string(),
        sqlx::Error::PoolTimedOut => "timed out waiting for a database connection".to_string(),
        sqlx::Error::PoolClosed => "database pool is closed".to_string(),
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
            "could not reach the record store".to_string()
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => "could not decode a stored record".to_string(),
        _ => "record store error".to_string(),
    }
}
