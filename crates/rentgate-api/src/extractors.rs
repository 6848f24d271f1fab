//! # Request Extraction Helpers
//!
//! Rejection-aware JSON extraction plus per-request-type validation. A body
//! that fails to parse and a body that parses but violates a business rule
//! both surface as `InvalidPayload` (400) — the wire contracts for this
//! service fix 400 for malformed payloads.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request types that carry their own field-level validation.
pub trait Validate {
    /// Check business-rule validity, returning a human-readable reason on
    /// failure.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON extraction result and run the payload's validation.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(payload) = body.map_err(|e| AppError::InvalidPayload(e.body_text()))?;
    payload.validate().map_err(AppError::InvalidPayload)?;
    Ok(payload)
}
