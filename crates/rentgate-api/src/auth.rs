//! # Authentication
//!
//! Bearer-token authentication for the user-facing endpoints. A token
//! resolves to an account through the [`TokenResolver`] collaborator; the
//! [`AuthedAccount`] extractor does the header parsing so handlers simply
//! take the authenticated account as a parameter.
//!
//! The payment webhook does not use bearer auth — it is a server-to-server
//! call protected by a shared secret (see `routes::webhook`).

use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use rentgate_core::AccountId;

use crate::error::AppError;
use crate::state::AppState;

/// Resolves a bearer token to an account.
///
/// This is the collaborator contract for whatever identity provider fronts
/// the dashboard; the core only needs `token -> account`.
pub trait TokenResolver: Send + Sync {
    /// Resolve a token, returning `None` when it is unknown or expired.
    fn resolve(&self, token: &str) -> Option<AccountId>;
}

/// Fixed token table, used by the default server wiring and tests.
#[derive(Debug, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, AccountId>,
}

impl StaticTokenResolver {
    /// Create an empty resolver (every request is unauthenticated).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for an account.
    pub fn with_token(mut self, token: impl Into<String>, account_id: AccountId) -> Self {
        self.tokens.insert(token.into(), account_id);
        self
    }
}

impl TokenResolver for StaticTokenResolver {
    fn resolve(&self, token: &str) -> Option<AccountId> {
        self.tokens.get(token).copied()
    }
}

/// Extractor for the authenticated account.
///
/// Parses `Authorization: Bearer <token>` and resolves it through the
/// state's [`TokenResolver`]. Missing header, malformed scheme, and unknown
/// token all reject with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthedAccount(pub AccountId);

impl FromRequestParts<AppState> for AuthedAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected Bearer scheme".to_string()))?;

        let account_id = state
            .tokens
            .resolve(token)
            .ok_or_else(|| AppError::Unauthorized("unknown token".to_string()))?;

        Ok(Self(account_id))
    }
}
