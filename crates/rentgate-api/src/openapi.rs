//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec, served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            "Bearer token authentication for the dashboard client.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentgate API",
        version = "0.1.0",
        description = "License verification, checkout, and payment settlement for the property-rental dashboard.\n\nProvides:\n- **License verification** — point-in-time entitlement snapshots for the signed-in account\n- **Checkout sessions** — purchase attempts against the plan catalog, with provider redirect links and status polling\n- **Payment webhook** — the provider's server-to-server settlement notification, idempotent by payment_id\n\nAuthentication: Bearer token via `Authorization: Bearer <token>`. The payment webhook instead uses the `x-webhook-secret` shared-secret header when configured. Health probes (`/health/*`) are unauthenticated.",
        license(name = "AGPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    security(
        ("bearer_token" = [])
    ),
    paths(
        // ── License ─────────────────────────────────────────────────────
        crate::routes::license::verify_license,
        // ── Checkout ────────────────────────────────────────────────────
        crate::routes::checkout::create_checkout_session,
        crate::routes::checkout::check_payment_status,
        // ── Webhook ─────────────────────────────────────────────────────
        crate::routes::webhook::payment_webhook,
        // ── Health ──────────────────────────────────────────────────────
        crate::routes::health::liveness,
        crate::routes::health::readiness,
    ),
    components(
        schemas(
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── License DTOs ────────────────────────────────────────────
            crate::routes::license::LicenseVerifyResponse,
            // ── Checkout DTOs ───────────────────────────────────────────
            crate::routes::checkout::CheckoutSessionRequest,
            crate::routes::checkout::CheckoutSessionResponse,
            crate::routes::checkout::PlanBody,
            crate::routes::checkout::PaymentStatusResponse,
            // ── Webhook DTOs ────────────────────────────────────────────
            crate::routes::webhook::PaymentWebhookRequest,
            crate::routes::webhook::PaymentWebhookResponse,
            // ── Health DTOs ─────────────────────────────────────────────
            crate::routes::health::HealthResponse,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "license", description = "Entitlement verification for the signed-in account"),
        (name = "checkout", description = "Checkout session creation and payment-status polling"),
        (name = "webhook", description = "Payment provider settlement notifications"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates_successfully() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Rentgate API");
        assert!(!spec.paths.paths.is_empty());
    }

    #[test]
    fn test_spec_covers_every_endpoint() {
        let spec = ApiDoc::openapi();
        for path in [
            "/license-verify",
            "/checkout-session",
            "/check-payment-status",
            "/payment-webhook",
            "/health/liveness",
            "/health/readiness",
        ] {
            assert!(
                spec.paths.paths.contains_key(path),
                "missing path: {path}"
            );
        }
    }
}
