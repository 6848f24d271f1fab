//! # License Verification API
//!
//! The endpoint the dashboard client calls on load (and after its cache
//! expires) to learn the account's current entitlement. The response is a
//! point-in-time snapshot computed by the evaluator — nothing here mutates
//! state.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use rentgate_core::Timestamp;
use rentgate_entitlement::{evaluate, EntitlementError};

use crate::auth::AuthedAccount;
use crate::error::AppError;
use crate::state::AppState;

/// Response from license verification.
///
/// A snapshot of the account's entitlement at the server's current instant,
/// plus the raw expiration so the client can display it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LicenseVerifyResponse {
    /// Whether the entitlement is currently valid.
    pub valid: bool,
    /// ISO 8601 expiration instant; `null` for perpetual access.
    pub expires_at: Option<String>,
    /// Whether the client should show the trial countdown advisory.
    pub is_trial: bool,
    /// Ceil-rounded days until expiry; `null` for perpetual access.
    pub days_remaining: Option<i64>,
    /// Whether write operations are allowed.
    pub can_edit: bool,
}

// ── Router ──────────────────────────────────────────────────────

/// Build the license verification router.
pub fn router() -> Router<AppState> {
    Router::new().route("/license-verify", post(verify_license))
}

// ── Handlers ────────────────────────────────────────────────────

/// POST /license-verify — Evaluate the authenticated account's entitlement.
///
/// The account is taken from the bearer token, never from the request body —
/// a client cannot ask about (or as) anyone else. Store failures surface as
/// 500 and the client is expected to fail closed.
#[utoipa::path(
    post,
    path = "/license-verify",
    responses(
        (status = 200, description = "Entitlement snapshot", body = LicenseVerifyResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorBody),
        (status = 404, description = "No entitlement record for the account", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "license"
)]
pub(crate) async fn verify_license(
    State(state): State<AppState>,
    AuthedAccount(account_id): AuthedAccount,
) -> Result<Json<LicenseVerifyResponse>, AppError> {
    let entitlement = state
        .store
        .get_entitlement(&account_id)
        .map_err(EntitlementError::Store)?
        .ok_or(EntitlementError::AccountNotFound(account_id))?;

    let now = state.clock.now();
    let snapshot = evaluate(now, entitlement.expires_at);

    tracing::debug!(
        account = %account_id,
        valid = snapshot.is_valid,
        is_trial = snapshot.is_trial,
        "license verified"
    );

    Ok(Json(LicenseVerifyResponse {
        valid: snapshot.is_valid,
        expires_at: entitlement.expires_at.map(|t: Timestamp| t.to_iso8601()),
        is_trial: snapshot.is_trial,
        days_remaining: snapshot.days_remaining,
        can_edit: snapshot.can_edit,
    }))
}
