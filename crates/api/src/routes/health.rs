//! Liveness probe with a record-store ping.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// `ok` when the record store answers, `degraded` otherwise. The process
/// stays up either way; detection calls fail with 500 until the store
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Ok,
    Degraded,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match kino_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Record store health check failed");
            false
        }
    };

    let status = if db_healthy {
        ServiceStatus::Ok
    } else {
        ServiceStatus::Degraded
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// `GET /health`, mounted at the root rather than under `/api/v1` and
/// without authentication.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
