//! # Entitlement Verification Transport
//!
//! The call the dashboard makes to learn its entitlement: one POST to
//! `/license-verify` with the session's bearer token, answered with a
//! snapshot plus the raw expiration.
//!
//! [`EntitlementVerifier`] is the seam: the cache and the gate consume the
//! trait, production wires [`HttpVerifier`], and tests wire a scripted
//! implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;

use rentgate_entitlement::EntitlementSnapshot;

use crate::error::ClientError;
use crate::retry::retry_send;

/// A boxed verification future, so the trait stays object-safe.
pub type VerifyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<EntitlementSnapshot, ClientError>> + Send + 'a>>;

/// The transport contract for entitlement verification.
pub trait EntitlementVerifier: Send + Sync {
    /// Fetch a fresh snapshot from the server.
    fn verify(&self) -> VerifyFuture<'_>;
}

/// Wire shape of the `/license-verify` response.
#[derive(Debug, Deserialize)]
struct VerifyResponseBody {
    valid: bool,
    is_trial: bool,
    days_remaining: Option<i64>,
    can_edit: bool,
}

impl From<VerifyResponseBody> for EntitlementSnapshot {
    fn from(body: VerifyResponseBody) -> Self {
        Self {
            is_valid: body.valid,
            is_trial: body.is_trial,
            days_remaining: body.days_remaining,
            can_edit: body.can_edit,
        }
    }
}

/// HTTP verifier backed by `reqwest`, with transport-level retry.
///
/// Per-request timeout is 5 seconds: verification blocks the dashboard's
/// first paint, and a slow answer is treated the same as no answer (the
/// cache fails closed).
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: reqwest::Client,
    verify_url: String,
    token: String,
}

impl HttpVerifier {
    /// Request timeout for verification calls.
    pub const TIMEOUT: Duration = Duration::from_secs(5);

    /// Build a verifier against `base_url` (e.g. `http://localhost:8080`)
    /// authenticating with `token`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        let base = base_url.into();
        Ok(Self {
            client,
            verify_url: format!("{}/license-verify", base.trim_end_matches('/')),
            token: token.into(),
        })
    }

    async fn verify_inner(&self) -> Result<EntitlementSnapshot, ClientError> {
        let response = retry_send(|| {
            self.client
                .post(&self.verify_url)
                .bearer_auth(&self.token)
                .send()
        })
        .await
        .map_err(|e| ClientError::Http {
            endpoint: self.verify_url.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                endpoint: self.verify_url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let body: VerifyResponseBody =
            response
                .json()
                .await
                .map_err(|e| ClientError::Deserialization {
                    endpoint: self.verify_url.clone(),
                    source: e,
                })?;
        Ok(body.into())
    }
}

impl EntitlementVerifier for HttpVerifier {
    fn verify(&self) -> VerifyFuture<'_> {
        Box::pin(self.verify_inner())
    }
}
