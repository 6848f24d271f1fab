//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in Rentgate. These prevent
//! accidental identifier confusion — you cannot pass an `AccountId` where a
//! `CheckoutSessionId` is expected, and a provider-assigned `PaymentId` can
//! never be mistaken for one of our own UUIDs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Unique identifier for an account. One account owns exactly one
/// entitlement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

/// Unique identifier for a checkout session (one purchase attempt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckoutSessionId(pub Uuid);

/// Identifier for a billing plan in the catalog (e.g. `"monthly"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

/// Provider-assigned identifier for a confirmed payment event.
///
/// This is the dedup key for settlement idempotency: the payment provider
/// may deliver the same webhook more than once, and a `PaymentId` already
/// present in an account's applied-payment ledger must not extend the
/// entitlement a second time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(String);

impl AccountId {
    /// Generate a new random account identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CheckoutSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanId {
    /// Wrap a plan identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PaymentId {
    /// Construct a payment identifier, rejecting empty/blank input.
    ///
    /// An empty dedup key would make every unrelated settlement look like a
    /// duplicate of every other, so it is rejected at construction.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::InvalidIdentifier(
                "payment id must be non-empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

impl std::fmt::Display for CheckoutSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
