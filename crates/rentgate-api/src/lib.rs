//! # rentgate-api — Axum API Service for Rentgate
//!
//! The HTTP surface of the entitlement subsystem for the property-rental
//! dashboard.
//!
//! ## API Surface
//!
//! | Route                    | Module               | Auth           |
//! |--------------------------|----------------------|----------------|
//! | `POST /license-verify`   | [`routes::license`]  | Bearer token   |
//! | `POST /checkout-session` | [`routes::checkout`] | Bearer token   |
//! | `GET /check-payment-status` | [`routes::checkout`] | Bearer token |
//! | `POST /payment-webhook`  | [`routes::webhook`]  | Shared secret  |
//! | `GET /health/*`          | [`routes::health`]   | None           |
//! | `GET /openapi.json`      | [`openapi`]          | None           |
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Bearer auth happens in the [`auth::AuthedAccount`] extractor, so the
/// webhook (shared-secret auth) and the unauthenticated probes share the
/// same router without a route-level auth middleware.
pub fn app(state: AppState) -> Router {
    // Body size limit: 64 KiB. Every payload on this surface is a small JSON
    // object; anything larger is not a legitimate request.
    Router::new()
        .merge(routes::license::router())
        .merge(routes::checkout::router())
        .merge(routes::webhook::router())
        .merge(routes::health::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
