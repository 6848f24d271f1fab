//! # Health Probes
//!
//! Unauthenticated liveness and readiness endpoints for orchestration.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Probe response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

/// GET /health/liveness — The process is up.
#[utoipa::path(
    get,
    path = "/health/liveness",
    responses((status = 200, description = "Alive", body = HealthResponse)),
    tag = "health"
)]
pub(crate) async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/readiness — The store answers reads.
#[utoipa::path(
    get,
    path = "/health/readiness",
    responses((status = 200, description = "Ready", body = HealthResponse)),
    tag = "health"
)]
pub(crate) async fn readiness(State(state): State<AppState>) -> Json<HealthResponse> {
    // A probe read against a random account exercises the store path without
    // depending on any record existing.
    let status = match state.store.get_entitlement(&rentgate_core::AccountId::new()) {
        Ok(_) => "ok",
        Err(_) => "degraded",
    };
    Json(HealthResponse {
        status: status.to_string(),
    })
}
