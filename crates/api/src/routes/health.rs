use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
///
/// The service holds no state of its own, so its health is the record
/// store's: `status` is `"degraded"` whenever the store cannot be reached.
/// The endpoint still answers 200 so a load balancer keeps routing to the
/// instance while the database recovers.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `prodline-api` package version.
    pub version: &'static str,
    pub store_healthy: bool,
}

/// Pings the record store once per call; nothing is cached.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.store.health_check().await.is_ok();

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
    })
}

/// `/health`, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
