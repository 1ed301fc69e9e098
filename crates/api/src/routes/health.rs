//! Liveness endpoint, mounted at the root (not under `/api`).

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database answers, `"degraded"` when it does not.
    pub status: &'static str,
    /// Version straight out of Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// Ping the database and report overall service health. Always 200;
/// monitors read the `status` field.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = sitedesk_db::health_check(&state.pool).await.is_ok();
    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
