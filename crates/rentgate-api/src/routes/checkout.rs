//! # Checkout Session API
//!
//! Session creation against the plan catalog and status polling for the
//! page the provider redirects back to.
//!
//! The external field names on this surface are camelCase (`planId`,
//! `sessionId`, `providerLink`) — they are consumed by the dashboard's
//! JavaScript client and match its conventions rather than the rest of the
//! API's snake_case.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use rentgate_core::{CheckoutSessionId, Plan, PlanId};
use rentgate_entitlement::{CheckoutSession, EntitlementError};

use crate::auth::AuthedAccount;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Session Creation ────────────────────────────────────────────

/// Request to open a checkout session.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CheckoutSessionRequest {
    /// Catalog identifier of the plan being purchased.
    #[serde(rename = "planId")]
    pub plan_id: String,
}

impl Validate for CheckoutSessionRequest {
    fn validate(&self) -> Result<(), String> {
        if self.plan_id.trim().is_empty() {
            return Err("planId must be non-empty".into());
        }
        Ok(())
    }
}

/// Response from session creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSessionResponse {
    /// Identifier of the new session.
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    /// URL the client redirects the user to for payment.
    #[serde(rename = "providerLink")]
    pub provider_link: String,
    /// The plan the session was opened against.
    pub plan: PlanBody,
}

/// A plan as presented on the checkout surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanBody {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub days_duration: i64,
}

impl From<&Plan> for PlanBody {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id.as_str().to_string(),
            name: plan.name.clone(),
            price_cents: plan.price_cents,
            days_duration: plan.days_duration,
        }
    }
}

// ── Status Polling ──────────────────────────────────────────────

/// Query parameters for payment-status polling.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentStatusQuery {
    /// The session to look up.
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
}

/// Response from payment-status polling.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentStatusResponse {
    /// Session lifecycle status: `created`, `paid`, `failed`, or `expired`.
    pub status: String,
    /// ISO 8601 session creation instant.
    pub created_at: String,
    /// The plan the session was opened against.
    pub plan_id: String,
    /// The account's current expiration instant, when an entitlement record
    /// with one exists. Reported for every session status; once the session
    /// is paid the polling page shows it as the "active until" confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

// ── Router ──────────────────────────────────────────────────────

/// Build the checkout router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout-session", post(create_checkout_session))
        .route("/check-payment-status", get(check_payment_status))
}

// ── Handlers ────────────────────────────────────────────────────

/// POST /checkout-session — Open a purchase attempt against a plan.
///
/// Every call creates a fresh session; repeated calls for the same plan
/// deliberately produce separate sessions (abandoned carts are just sessions
/// that never leave `created`). Unknown plans are 404.
#[utoipa::path(
    post,
    path = "/checkout-session",
    request_body = CheckoutSessionRequest,
    responses(
        (status = 200, description = "Session created", body = CheckoutSessionResponse),
        (status = 400, description = "Malformed payload", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown plan", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "checkout"
)]
pub(crate) async fn create_checkout_session(
    State(state): State<AppState>,
    AuthedAccount(account_id): AuthedAccount,
    body: Result<Json<CheckoutSessionRequest>, JsonRejection>,
) -> Result<Json<CheckoutSessionResponse>, AppError> {
    let request = extract_validated_json(body)?;

    let plan_id = PlanId::new(request.plan_id.trim());
    let plan = state
        .plans
        .get(&plan_id)
        .ok_or(EntitlementError::PlanNotFound(plan_id.clone()))?;

    let session = CheckoutSession::new(account_id, plan_id, state.clock.now());
    let session_id = session.id;
    state
        .store
        .insert_session(session)
        .map_err(EntitlementError::Store)?;

    tracing::info!(
        account = %account_id,
        session = %session_id,
        plan = %plan.id,
        "checkout session created"
    );

    Ok(Json(CheckoutSessionResponse {
        session_id: *session_id.as_uuid(),
        provider_link: format!(
            "{}/{}",
            state.config.provider_checkout_base.trim_end_matches('/'),
            session_id.as_uuid()
        ),
        plan: PlanBody::from(plan),
    }))
}

/// GET /check-payment-status — Poll a session's lifecycle status.
///
/// Only the session's owner may poll it. A session owned by another account
/// answers 404, the same as a session that does not exist — the response
/// must not confirm that a guessed session id is real.
#[utoipa::path(
    get,
    path = "/check-payment-status",
    params(("sessionId" = Uuid, Query, description = "Checkout session ID")),
    responses(
        (status = 200, description = "Session status", body = PaymentStatusResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown session (or not owned by the caller)", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "checkout"
)]
pub(crate) async fn check_payment_status(
    State(state): State<AppState>,
    AuthedAccount(account_id): AuthedAccount,
    Query(query): Query<PaymentStatusQuery>,
) -> Result<Json<PaymentStatusResponse>, AppError> {
    let session_id = CheckoutSessionId(query.session_id);
    let session = state
        .store
        .get_session(&session_id)
        .map_err(EntitlementError::Store)?
        .ok_or(EntitlementError::SessionNotFound(session_id))?;

    // Anti-enumeration: foreign sessions are indistinguishable from missing.
    if session.account_id != account_id {
        return Err(EntitlementError::SessionNotFound(session_id).into());
    }

    let expires_at = state
        .store
        .get_entitlement(&account_id)
        .map_err(EntitlementError::Store)?
        .and_then(|e| e.expires_at)
        .map(|t| t.to_iso8601());

    Ok(Json(PaymentStatusResponse {
        status: session.status.to_string(),
        created_at: session.created_at.to_iso8601(),
        plan_id: session.plan_id.as_str().to_string(),
        expires_at,
    }))
}
