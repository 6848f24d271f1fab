//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from rentgate-entitlement to HTTP status codes and
//! JSON error bodies. Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use rentgate_entitlement::EntitlementError;

/// Structured JSON error response body.
///
/// All error responses use this format across the API surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "INVALID_PAYLOAD").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`].
///
/// `InvalidPayload` maps to 400 — the webhook contract with the payment
/// provider fixes 400 for malformed payloads, so body-parse failures and
/// missing fields are 400 here, not 422.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404): account, plan, or session.
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing/malformed body or non-positive fields (400).
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Authentication failure — missing or unresolvable token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure — resource owned by another account (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Conflict with current resource state (409), e.g. a checkout session
    /// transition out of a terminal status.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Unauthorized(_) => tracing::debug!(error = %self, "request rejected"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert entitlement domain errors to API errors.
impl From<EntitlementError> for AppError {
    fn from(err: EntitlementError) -> Self {
        match &err {
            EntitlementError::AccountNotFound(_)
            | EntitlementError::PlanNotFound(_)
            | EntitlementError::SessionNotFound(_) => Self::NotFound(err.to_string()),
            EntitlementError::Forbidden(_) => Self::Forbidden(err.to_string()),
            EntitlementError::InvalidPayload(_) => Self::InvalidPayload(err.to_string()),
            EntitlementError::Checkout(_) => Self::Conflict(err.to_string()),
            EntitlementError::Store(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentgate_core::{AccountId, CheckoutSessionId};
    use rentgate_entitlement::StoreError;

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("missing account".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn invalid_payload_is_400() {
        // The webhook contract fixes 400 for malformed payloads.
        let err = AppError::InvalidPayload("days_to_add missing".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_PAYLOAD");
    }

    #[test]
    fn unauthorized_status_code() {
        let err = AppError::Unauthorized("no token".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "UNAUTHORIZED");
    }

    #[test]
    fn forbidden_status_code() {
        let err = AppError::Forbidden("not your session".to_string());
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflict_status_code() {
        let err = AppError::Conflict("session already paid".to_string());
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn internal_status_code() {
        let err = AppError::Internal("store exploded".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }

    #[test]
    fn account_not_found_converts_to_404() {
        let err = AppError::from(EntitlementError::AccountNotFound(AccountId::new()));
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_session_converts_to_403() {
        let err = AppError::from(EntitlementError::Forbidden(CheckoutSessionId::new()));
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_failure_converts_to_500() {
        let err = AppError::from(EntitlementError::Store(StoreError::Unavailable(
            "connection refused".to_string(),
        )));
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    /// Helper to extract status and body from a Response.
    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_not_found() {
        let (status, body) = response_parts(AppError::NotFound("plan lifetime".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.code, "NOT_FOUND");
        assert!(body.error.message.contains("plan lifetime"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("db connection failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        // The internal error message must NOT appear in the response body.
        assert!(
            !body.error.message.contains("db connection"),
            "internal error details must not leak: {}",
            body.error.message
        );
        assert_eq!(body.error.message, "An internal error occurred");
    }
}
