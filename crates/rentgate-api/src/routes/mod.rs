//! # API Route Modules
//!
//! Route modules for the Rentgate API surface:
//!
//! - `license` — Entitlement verification for the signed-in account: the
//!   dashboard's single source of truth for "can this account edit?".
//! - `checkout` — Checkout session creation against the plan catalog and
//!   payment-status polling for the post-redirect page.
//! - `webhook` — The payment provider's server-to-server settlement
//!   notification, the only writer of `expires_at`.
//! - `health` — Liveness and readiness probes, unauthenticated.

pub mod checkout;
pub mod health;
pub mod license;
pub mod webhook;
