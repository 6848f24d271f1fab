//! # Application State
//!
//! Shared state for the Axum application. Every collaborator is an `Arc`'d
//! trait object — store, token resolver, clock — so tests substitute
//! deterministic implementations without touching the handlers.

use std::sync::Arc;

use rentgate_core::{Clock, PlanCatalog, SystemClock};
use rentgate_entitlement::{EntitlementStore, InMemoryEntitlementStore};

use crate::auth::{StaticTokenResolver, TokenResolver};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the server binds to.
    pub port: u16,
    /// Base URL the client is redirected to for payment; the session id is
    /// appended as the final path segment.
    pub provider_checkout_base: String,
    /// Shared secret required in `x-webhook-secret` on the payment webhook.
    /// `None` disables the check (e.g. when an IP allowlist fronts the
    /// service instead).
    pub webhook_secret: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            provider_checkout_base: "https://pay.example.com/session".to_string(),
            webhook_secret: None,
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Entitlement and checkout session persistence.
    pub store: Arc<dyn EntitlementStore>,
    /// Bearer-token to account resolution.
    pub tokens: Arc<dyn TokenResolver>,
    /// Plan catalog for checkout.
    pub plans: Arc<PlanCatalog>,
    /// Time source for all expiry math.
    pub clock: Arc<dyn Clock>,
    /// Server configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Default wiring: in-memory store, empty token table, built-in plans,
    /// system clock.
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(InMemoryEntitlementStore::new()),
            Arc::new(StaticTokenResolver::new()),
            PlanCatalog::builtin(),
            Arc::new(SystemClock),
            AppConfig::default(),
        )
    }

    /// Explicit wiring, used by the binary and by tests.
    pub fn with_parts(
        store: Arc<dyn EntitlementStore>,
        tokens: Arc<dyn TokenResolver>,
        plans: PlanCatalog,
        clock: Arc<dyn Clock>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            tokens,
            plans: Arc::new(plans),
            clock,
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
