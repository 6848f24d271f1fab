//! # Payment Webhook API
//!
//! The payment provider's server-to-server settlement notification — the
//! only path that extends an account's `expires_at`.
//!
//! ## Delivery semantics
//!
//! Providers retry webhooks until they see a 2xx, so this endpoint must be
//! idempotent: duplicate deliveries of the same `payment_id` answer 200 with
//! the already-applied expiration. A non-2xx tells the provider to retry, so
//! transient store failures are 500 (retry me) while malformed payloads are
//! 400 (retrying will not help).
//!
//! ## Authentication
//!
//! Not bearer auth — the caller is the provider, not a user. When a shared
//! secret is configured, deliveries must carry it in `x-webhook-secret`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use rentgate_core::{AccountId, PaymentId};
use rentgate_entitlement::{apply_settlement, EntitlementError, MAX_SETTLEMENT_DAYS};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Header carrying the webhook shared secret.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// A settlement notification from the payment provider.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentWebhookRequest {
    /// The account whose entitlement the payment extends.
    pub user_id: Uuid,
    /// Whole days to add to the entitlement.
    pub days_to_add: i64,
    /// Provider-assigned payment identifier, the idempotency key. Deliveries
    /// without one cannot be deduplicated and always apply.
    pub payment_id: Option<String>,
    /// Payment method label (informational, logged only).
    pub payment_method: Option<String>,
    /// Amount in the smallest currency unit (informational, logged only).
    pub amount: Option<i64>,
}

impl Validate for PaymentWebhookRequest {
    fn validate(&self) -> Result<(), String> {
        if self.days_to_add <= 0 {
            return Err(format!(
                "days_to_add must be positive, got {}",
                self.days_to_add
            ));
        }
        if self.days_to_add > MAX_SETTLEMENT_DAYS {
            return Err(format!(
                "days_to_add must be at most {MAX_SETTLEMENT_DAYS}, got {}",
                self.days_to_add
            ));
        }
        if let Some(ref pid) = self.payment_id {
            if pid.trim().is_empty() {
                return Err("payment_id, when present, must be non-empty".into());
            }
        }
        Ok(())
    }
}

/// Response to a settlement notification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentWebhookResponse {
    /// Always `true` on 2xx; failures use the error envelope.
    pub success: bool,
    /// ISO 8601 expiration after this settlement (or after the original
    /// application, for duplicate deliveries).
    pub new_expiration: String,
}

// ── Router ──────────────────────────────────────────────────────

/// Build the payment webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/payment-webhook", post(payment_webhook))
}

// ── Handlers ────────────────────────────────────────────────────

/// POST /payment-webhook — Apply a confirmed payment to an entitlement.
///
/// Runs the settlement inside the store's atomic update so concurrent
/// deliveries for the same account serialize. The account must already have
/// an entitlement record; settlement never provisions accounts.
#[utoipa::path(
    post,
    path = "/payment-webhook",
    request_body = PaymentWebhookRequest,
    responses(
        (status = 200, description = "Settlement applied (or duplicate replayed)", body = PaymentWebhookResponse),
        (status = 400, description = "Malformed payload or non-positive days_to_add", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or wrong webhook secret", body = crate::error::ErrorBody),
        (status = 404, description = "No entitlement record for the account", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure; the provider should retry", body = crate::error::ErrorBody),
    ),
    tag = "webhook"
)]
pub(crate) async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PaymentWebhookRequest>, JsonRejection>,
) -> Result<Json<PaymentWebhookResponse>, AppError> {
    check_webhook_secret(&state, &headers)?;

    let request = extract_validated_json(body)?;

    let account_id = AccountId(request.user_id);
    let payment_id = match request.payment_id {
        Some(pid) => Some(
            PaymentId::new(pid).map_err(|e| AppError::InvalidPayload(e.to_string()))?,
        ),
        None => None,
    };

    let now = state.clock.now();
    let days_to_add = request.days_to_add;

    let mut outcome = None;
    state.store.update_entitlement(&account_id, &mut |e| {
        outcome = Some(apply_settlement(e, now, days_to_add, payment_id.clone())?);
        Ok(())
    })?;
    // The closure ran exactly once if update_entitlement succeeded.
    let outcome = outcome.ok_or_else(|| {
        AppError::Internal("settlement closure did not run".to_string())
    })?;

    tracing::info!(
        account = %account_id,
        days_added = days_to_add,
        deduplicated = outcome.deduplicated,
        payment_method = request.payment_method.as_deref().unwrap_or("unspecified"),
        amount = request.amount.unwrap_or(0),
        "payment webhook processed"
    );

    Ok(Json(PaymentWebhookResponse {
        success: true,
        new_expiration: outcome.new_expiration.to_iso8601(),
    }))
}

/// Enforce the shared secret when one is configured.
fn check_webhook_secret(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(ref expected) = state.config.webhook_secret else {
        return Ok(());
    };
    let presented = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing webhook secret".to_string()))?;
    if presented != expected {
        return Err(AppError::Unauthorized("wrong webhook secret".to_string()));
    }
    Ok(())
}
